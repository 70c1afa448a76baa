//! XML navigation helpers over `roxmltree` nodes.

mod utils;

pub use utils::{
    attribute_text, child_text, find_by_path, find_child, find_children, get_tag_name, get_text,
};
