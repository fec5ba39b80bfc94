//! Integration tests spanning traversal, systems and animation

mod frame_pipeline;
