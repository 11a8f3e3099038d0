pub mod element;
pub mod event;
pub mod markup;

pub use element::{closest, find_element, find_element_mut, for_each_mut, query_all, Content, Element};
pub use event::Event;
pub use markup::to_markup;
