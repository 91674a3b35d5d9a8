pub mod advanced;
pub mod aggregation;
pub mod basic;
pub mod indexing;
pub mod seed;

use crate::core::sequence::QueryStep;

/// The fixed tour, in the order the steps are meant to run. Seeding leads so
/// the queries have data to hit; the mutating basic steps run before the
/// advanced reads.
pub fn full_tour(page_size: i64) -> Vec<Box<dyn QueryStep>> {
    let mut steps = seed::steps();
    steps.extend(basic::steps());
    steps.extend(advanced::steps(page_size));
    steps.extend(aggregation::steps());
    steps.extend(indexing::steps());
    steps
}
