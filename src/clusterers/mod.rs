mod clusterer;

pub use clusterer::Clusterer;
pub use clusterer::ClusteringError;
