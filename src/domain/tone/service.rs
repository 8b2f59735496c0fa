use crate::config::ProviderConfig;

use super::client::{CompletionClientRef, ProviderError};
use super::dto::{ToneResult, ToneStyle};
use super::prompt::PromptTemplate;

/// 파이프라인 단계
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Professionalize,
    Refine,
}

impl Stage {
    fn as_str(self) -> &'static str {
        match self {
            Stage::Professionalize => "professionalize",
            Stage::Refine => "refine",
        }
    }
}

/// 단계별 모델 식별자
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSelection {
    pub professionalize: String,
    pub refine: String,
}

impl From<&ProviderConfig> for ModelSelection {
    fn from(config: &ProviderConfig) -> Self {
        Self {
            professionalize: config.model.clone(),
            refine: config.refine_model.clone(),
        }
    }
}

/// 문체 변환 파이프라인
///
/// 원격 호출이 실패하면 입력 텍스트를 그대로 돌려줍니다.
/// 에러는 로그와 메트릭으로만 남고 호출자에게 전파되지 않습니다.
pub struct ToneService {
    client: CompletionClientRef,
    prompts: PromptTemplate,
    models: ModelSelection,
}

impl ToneService {
    pub fn new(client: CompletionClientRef, prompts: PromptTemplate, models: ModelSelection) -> Self {
        Self {
            client,
            prompts,
            models,
        }
    }

    /// 1차 변환
    pub async fn professionalize(&self, input_text: &str, text_type: ToneStyle) -> ToneResult {
        let prompt = self.prompts.render(input_text, text_type.as_str(), false);
        let professional_text = self
            .complete_or_fallback(
                Stage::Professionalize,
                &prompt,
                &self.models.professionalize,
                input_text,
            )
            .await;

        ToneResult::new(professional_text, text_type)
    }

    /// 이전 결과를 한 번 더 다듬음 (문체 유지)
    pub async fn refine(&self, previous: &ToneResult) -> ToneResult {
        let prompt = self.prompts.render(
            &previous.professional_text,
            previous.text_type.as_str(),
            true,
        );
        let refined_text = self
            .complete_or_fallback(
                Stage::Refine,
                &prompt,
                &self.models.refine,
                &previous.professional_text,
            )
            .await;

        ToneResult::new(refined_text, previous.text_type)
    }

    async fn complete_or_fallback(
        &self,
        stage: Stage,
        prompt: &str,
        model_id: &str,
        fallback: &str,
    ) -> String {
        match self.client.complete(prompt, model_id).await {
            Ok(text) => {
                tracing::debug!(
                    stage = stage.as_str(),
                    model = model_id,
                    output_length = text.len(),
                    "Completion succeeded"
                );
                text
            }
            Err(error) => {
                record_fallback(stage, &error);
                fallback.to_string()
            }
        }
    }
}

fn record_fallback(stage: Stage, error: &ProviderError) {
    tracing::warn!(
        stage = stage.as_str(),
        error = %error,
        "Provider call failed, returning input unchanged"
    );
    metrics::counter!("tone_provider_fallbacks_total", "stage" => stage.as_str()).increment(1);
}
