// ── Reactive data store ──
//
// Entity caches plus shared view state, with push-based change
// notification.

mod collection;
mod data_store;
mod refresh;

pub use data_store::DataStore;
