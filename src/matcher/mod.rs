pub mod algorithms;
pub mod cluster;

// Re-export the main types
pub use self::algorithms::{algorithm_for, SimilarityAlgorithm};
pub use self::cluster::{apply_clusters, ClusterAssigner};
