mod binding_cpp;
mod dub_h;

pub use binding_cpp::BindingCpp;
pub use dub_h::{DUB_H_PATH, DubH};
