//! `professionalize_tone` 함수 선언
//!
//! function calling을 지원하는 모델/에이전트가 이 서비스를 도구로 등록할 때 쓰는 JSON 스키마입니다.

use serde_json::{json, Value};

use super::dto::ToneStyle;

pub const TOOL_NAME: &str = "professionalize_tone";

pub fn professionalize_declaration() -> Value {
    let styles: Vec<&str> = ToneStyle::ALL.iter().map(|style| style.as_str()).collect();

    json!({
        "name": TOOL_NAME,
        "description": "Professionalizes the tone of a given input text. Supports academic, corporate, political, or neutral styles.",
        "parameters": {
            "type": "object",
            "properties": {
                "input_text": {
                    "type": "string",
                    "description": "The input text that needs to be professionalized"
                },
                "text_type": {
                    "type": "string",
                    "enum": styles,
                    "description": "The professional domain/style to apply"
                }
            },
            "required": ["input_text", "text_type"]
        }
    })
}
