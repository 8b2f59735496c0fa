use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// 문체 스타일 Enum
///
/// 와이어 포맷은 소문자 라벨(`academic`, `corporate`, `political`, `default`)입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ToneStyle {
    /// 학술적 문체
    Academic,
    /// 비즈니스 문체
    Corporate,
    /// 정치/공공 연설 문체
    Political,
    /// 중립적인 기본 문체
    #[serde(rename = "default")]
    Neutral,
}

impl ToneStyle {
    pub const ALL: [ToneStyle; 4] = [
        ToneStyle::Academic,
        ToneStyle::Corporate,
        ToneStyle::Political,
        ToneStyle::Neutral,
    ];

    /// 프롬프트에 그대로 들어가는 라벨
    pub fn as_str(self) -> &'static str {
        match self {
            ToneStyle::Academic => "academic",
            ToneStyle::Corporate => "corporate",
            ToneStyle::Political => "political",
            ToneStyle::Neutral => "default",
        }
    }
}

impl fmt::Display for ToneStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported text_type '{0}', expected one of academic, corporate, political, default")]
pub struct UnknownToneStyle(pub String);

impl FromStr for ToneStyle {
    type Err = UnknownToneStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        ToneStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == normalized)
            .ok_or_else(|| UnknownToneStyle(s.to_string()))
    }
}

/// 문체 변환 요청 DTO
///
/// `/api/professionalize`, `/api/refine` 공용입니다. refine에서는 이전 단계의 결과로 취급됩니다.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct ToneRequest {
    /// 변환할 텍스트 (1 ~ 5000자)
    #[validate(length(
        min = 1,
        max = 5000,
        message = "input_text must be between 1 and 5000 characters"
    ))]
    #[schema(example = "i need this doc by friday pls")]
    pub input_text: String,

    /// 문체 라벨 (academic, corporate, political, default)
    #[schema(example = "corporate")]
    pub text_type: String,
}

/// 문체 변환 결과
///
/// 각 단계가 만들어내고, refine 단계의 입력이 됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct ToneResult {
    #[schema(example = "Could you please share the document by Friday?")]
    pub professional_text: String,

    #[schema(example = "corporate")]
    pub text_type: ToneStyle,
}

impl ToneResult {
    pub fn new(professional_text: impl Into<String>, text_type: ToneStyle) -> Self {
        Self {
            professional_text: professional_text.into(),
            text_type,
        }
    }
}
