// Card generation: content pooling, unique-content allocation, orchestration.
// Pure and synchronous; rendering and export live in `render`.

pub mod allocator;
pub mod generator;
pub mod pool;
