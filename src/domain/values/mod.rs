pub mod dtype;
pub mod feature_array;
pub mod feature_vectors;
