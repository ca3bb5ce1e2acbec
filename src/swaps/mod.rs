/// Raydium AMM v4 swap pipeline
///
/// estimator -> builder -> executor, wired together by `session`.

pub mod builder;
pub mod estimator;
pub mod executor;
pub mod instructions;
pub mod session;
pub mod types;

pub use builder::{build_swap, BuiltSwap};
pub use estimator::SwapEstimator;
pub use executor::TransactionExecutor;
pub use instructions::SwapInstruction;
pub use session::{SessionResult, SwapSession};
pub use types::{SwapQuote, SwapRequest, SwapTask, TransactionOutcome, TransactionStatus};
