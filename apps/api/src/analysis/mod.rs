// Resume analysis: document extraction, prompt construction, model output decoding.
// The completion call itself goes through llm_client.

pub mod decoder;
pub mod extractor;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod report;
pub mod request;
