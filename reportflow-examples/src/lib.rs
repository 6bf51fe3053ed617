//! Runnable examples for reportflow. See `examples/`:
//!
//! - `mock_report`: full pipeline against a scratch SQLite table with a scripted LLM.
//! - `print_graph`: prints the report workflow topology as text and Graphviz DOT.
