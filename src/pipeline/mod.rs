//! The color core: keyword lookup and image extraction feed a base color
//! into the harmony generator.

pub mod extract;
pub mod harmony;
pub mod lookup;
