pub mod head_tail_list;

pub use head_tail_list::{HeadTailList, Iter};
