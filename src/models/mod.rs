mod review;

pub use review::{PageMeta, Review, ReviewInput, ReviewPage};
