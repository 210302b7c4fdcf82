use hktap_core::gateways::text_generation::*;
use hktap_gateways::openrouter::OpenRouter;

use crate::config::AssistantGateway;

/// Used if no assistant gateway is configured.
struct NoTextGeneration;

impl TextGenerationGateway for NoTextGeneration {
    fn complete(&self, _: &CompletionRequest) -> Result<Completion, TextGenerationError> {
        Err(TextGenerationError::MissingCredential)
    }
}

pub fn text_generation_gateway(
    cfg: Option<AssistantGateway>,
) -> Box<dyn TextGenerationGateway + Send + Sync> {
    match cfg {
        Some(AssistantGateway::OpenRouter {
            api_key,
            api_base_url,
            model,
            max_tokens,
            temperature,
            referer,
            title,
            timeout,
        }) => {
            if api_key.is_none() {
                log::warn!("No OpenRouter API key configured, the assistant will not answer");
            }
            Box::new(OpenRouter {
                api_key,
                api_base_url,
                model,
                max_tokens,
                temperature,
                referer,
                title,
                timeout,
            })
        }
        None => {
            log::warn!("No assistant gateway configured");
            Box::new(NoTextGeneration)
        }
    }
}
