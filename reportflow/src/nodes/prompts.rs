//! System instructions sent to the language model.

use crate::analysis::Analysis;
use crate::state::{EntityFilter, TaskKind, ALL_ENTITIES};

pub(crate) fn classify_instruction() -> String {
    format!(
        "Classify the user's request into a task type.\n\
         \n\
         Possible task types:\n\
         - {report}: performance reports, sales analysis, results reports\n\
         - Other: anything else\n\
         \n\
         Answer with exactly one of: \"{report}\" or \"Other\".",
        report = TaskKind::PERFORMANCE_REPORT_LABEL
    )
}

pub(crate) fn extract_entity_instruction() -> String {
    format!(
        "Extract the specific client, product or region named in the user's request.\n\
         If none is explicitly mentioned, answer \"{all}\".\n\
         Answer with the name only.\n\
         \n\
         Examples:\n\
         - \"ABC 제품의 매출 현황\" -> \"ABC\"\n\
         - \"서울 지역 실적\" -> \"서울\"\n\
         - \"전체 매출 보고서\" -> \"{all}\"",
        all = ALL_ENTITIES
    )
}

/// Instruction for the report draft. The analysis is embedded as pretty-printed JSON.
pub(crate) fn draft_report_instruction(
    entity: &EntityFilter,
    analysis: &Analysis,
    language: &str,
) -> Result<String, serde_json::Error> {
    let analysis_json = serde_json::to_string_pretty(analysis)?;
    Ok(format!(
        "Write a professional performance report in {language} based on the analysis below.\n\
         \n\
         Subject: {entity}\n\
         Analysis:\n\
         {analysis_json}\n\
         \n\
         Structure the report as follows:\n\
         1. Executive summary\n\
         2. Key metrics\n\
         3. Trend analysis\n\
         4. Insights and recommendations\n\
         \n\
         Keep it professional and easy to read."
    ))
}
