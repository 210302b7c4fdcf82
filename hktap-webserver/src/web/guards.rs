use std::sync::Arc;

use hktap_core::gateways::text_generation::TextGenerationGateway;

pub struct Version(pub &'static str);

pub struct TextGeneration(pub Arc<dyn TextGenerationGateway + Send + Sync>);
