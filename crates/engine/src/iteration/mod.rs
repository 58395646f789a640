pub mod controller;

pub use controller::{
    create_optimization_result, determine_termination_reason, evaluate_termination_criteria,
    process_iteration, IterationHistory, IterationOutcome, OptimizationMetrics,
    OptimizationResult, RoundVerdict, TerminationCheck, TerminationReason,
};
