// Pipeline orchestration: file in, files out.
//
// The keyword stage ranks the opening post of a thread; the thread stage
// resolves replies, builds the interaction graphs and writes the statistics
// tables for each keyword ranking.

pub mod keywords;
pub mod thread;
