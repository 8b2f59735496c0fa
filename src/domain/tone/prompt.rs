//! 문체 변환 프롬프트
//!
//! 1차 변환과 refine 단계가 같은 템플릿을 공유하고, refine 여부에 따라 보조 지침만 추가됩니다.

/// 문체 라벨이 들어갈 자리
pub const TEXT_TYPE_PLACEHOLDER: &str = "{text_type}";

pub const DEFAULT_INSTRUCTION: &str = r#"Rewrite the text below in a {text_type} professional tone.

CONSTRAINTS:
- Output ONLY the professionalized paragraph.
- Do not include any intro, outro, or 'Here is the rewrite'.
- Use a single, cohesive paragraph.
- Correct all spelling and grammar mistakes."#;

pub const DEFAULT_REFINE_INSTRUCTION: &str = "Refine the text further by improving clarity, formality, and flow without changing the original meaning.";

/// 프롬프트 템플릿
///
/// `instruction`에는 반드시 [`TEXT_TYPE_PLACEHOLDER`]가 포함되어야 합니다.
/// 설정 로딩 시 검증합니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    pub instruction: String,
    pub refine_instruction: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            instruction: DEFAULT_INSTRUCTION.to_string(),
            refine_instruction: DEFAULT_REFINE_INSTRUCTION.to_string(),
        }
    }
}

impl PromptTemplate {
    pub fn has_placeholder(&self) -> bool {
        self.instruction.contains(TEXT_TYPE_PLACEHOLDER)
    }

    /// 프롬프트 렌더링
    ///
    /// 치환은 지침 부분에만 적용하고 입력 텍스트는 그 뒤에 그대로 붙입니다.
    pub fn render(&self, input_text: &str, text_type: &str, refine: bool) -> String {
        let mut prompt = self
            .instruction
            .trim()
            .replace(TEXT_TYPE_PLACEHOLDER, text_type);

        if refine {
            prompt.push_str("\n\n");
            prompt.push_str(self.refine_instruction.trim());
        }

        prompt.push_str("\n\nTEXT:\n");
        prompt.push_str(input_text);

        prompt.trim().to_string()
    }
}

/// 기본 템플릿으로 프롬프트 생성
pub fn build_prompt(input_text: &str, text_type: &str, refine: bool) -> String {
    PromptTemplate::default().render(input_text, text_type, refine)
}
