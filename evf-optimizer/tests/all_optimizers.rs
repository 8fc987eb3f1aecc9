#![allow(unused_macros)]
use rstest_reuse::template;

// This creates a testing "template" to allow for the injection of each
// execution mode. The chunk size is deliberately small so that even the
// modest populations used in tests span several chunks.

#[template]
#[rstest]
#[case::sequential(evf_optimizer::PortfolioOptimizer::new(evf_optimizer::OptimizerSettings {
    chunk_size: 3,
    execution: evf_optimizer::Execution::Sequential,
}))]
#[case::parallel(evf_optimizer::PortfolioOptimizer::new(evf_optimizer::OptimizerSettings {
    chunk_size: 3,
    execution: evf_optimizer::Execution::Parallel,
}))]
pub fn all_optimizers(#[case] optimizer: evf_optimizer::PortfolioOptimizer) {}
