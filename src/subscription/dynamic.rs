use smallvec::SmallVec;

use super::Subscription;

/// Id-keyed collection of live items, used where members come and go one
/// by one (inner streams of `merge_all`, observers of a subject, pending
/// `delay` tasks).
///
/// `reserve_id` + `insert` covers the case where an item needs its own id
/// before it exists, e.g. an inner observer that removes itself on
/// completion.
pub struct DynamicSubscriptions<U> {
  next_id: usize,
  items: SmallVec<[(usize, U); 2]>,
}

impl<U> Default for DynamicSubscriptions<U> {
  fn default() -> Self { Self { next_id: 0, items: SmallVec::new() } }
}

impl<U> DynamicSubscriptions<U> {
  #[inline]
  pub fn add(&mut self, item: U) -> usize {
    let id = self.reserve_id();
    self.items.push((id, item));
    id
  }

  #[inline]
  pub fn reserve_id(&mut self) -> usize {
    let id = self.next_id;
    self.next_id += 1;
    id
  }

  #[inline]
  pub fn insert(&mut self, id: usize, item: U) { self.items.push((id, item)); }

  pub fn remove(&mut self, id: usize) -> Option<U> {
    self
      .items
      .iter()
      .position(|(i, _)| *i == id)
      .map(|pos| self.items.remove(pos).1)
  }

  #[inline]
  pub fn len(&self) -> usize { self.items.len() }

  #[inline]
  pub fn is_empty(&self) -> bool { self.items.is_empty() }

  /// Empties the collection, yielding items in insertion order.
  pub fn take_all(&mut self) -> SmallVec<[U; 2]> {
    self.items.drain(..).map(|(_, item)| item).collect()
  }

  #[inline]
  pub fn iter(&self) -> impl Iterator<Item = &U> { self.items.iter().map(|(_, item)| item) }

  pub fn retain(&mut self, mut keep: impl FnMut(&U) -> bool) { self.items.retain(|(_, u)| keep(u)); }
}

impl<U: Subscription> DynamicSubscriptions<U> {
  /// Drop members that already closed on their own.
  pub fn retain_open(&mut self) { self.retain(|u| !u.is_closed()); }
}

impl<U: Subscription> Subscription for DynamicSubscriptions<U> {
  fn unsubscribe(mut self) {
    for item in self.take_all() {
      item.unsubscribe();
    }
  }

  fn is_closed(&self) -> bool { self.items.iter().all(|(_, u)| u.is_closed()) }
}
