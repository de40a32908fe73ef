mod relation_ordering;

pub use relation_ordering::{lower_order_first, RelationOrdering, DEFAULT_RELATION_PASS_CEILING};
