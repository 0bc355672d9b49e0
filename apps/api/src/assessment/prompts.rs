// All LLM prompt constants for the assessment module.
// Templates use `{name}` placeholders filled by `prompt_builder`.

/// System prompt for recommendation generation; enforces the RecommendationSet shape.
pub const RECOMMENDATIONS_SYSTEM: &str = "You are an expert in university program assessment and accreditation. \
    You must respond with a valid JSON object containing exactly these keys:
    - recommendations: array of objects with 'category' and 'items' keys
    - evidence: array of strings
    - kpis: array of strings";

/// Recommendation prompt template.
/// Replace: {scale}, {results_json}
pub const RECOMMENDATIONS_PROMPT_TEMPLATE: &str = r#"Analyze the following assessment results for a university program and generate specific recommendations.
{scale}

Assessment Results by Category:
{results_json}

Based on these results, provide recommendations, evidence requirements, and KPIs.
Focus particularly on areas rated 3 or lower that need improvement."#;

/// System prompt for the full compliance report.
pub const REPORT_SYSTEM: &str = "You are an expert in program assessment and accreditation. \
    Generate a detailed, professional report with specific recommendations and KPIs for each standard. \
    Format all content in tables as bullet points for better readability.";

/// Report prompt template.
/// Replace: {general_information}, {scale}, {results_json}, {recommendations_json},
///          {required_kpis}, {missing_data_instruction}
pub const REPORT_PROMPT_TEMPLATE: &str = r#"Generate a comprehensive program assessment report with the following structure:

First, start with a summary of the program information:

Section A: GENERAL INFORMATION
{general_information}

Then, analyze the following assessment results for each standard and generate specific recommendations.
{scale}

Assessment Results by Category:
{results_json}

Recommendations:
{recommendations_json}

For each standard, provide a detailed analysis in a single table with four columns:
| Strengths | Weaknesses | Recommendations | Key Performance Indicators (KPIs) |

Important formatting rules:
1. Each cell should contain bullet points starting with "• "
2. For every weakness point identified, there MUST be a corresponding recommendation that directly addresses it
3. All KPIs must be specific, measurable, and quantifiable with clear metrics
4. Each standard's table should be presented as a single row with four columns
5. Ensure recommendations are actionable and specific

Required KPIs for each standard (in addition to other relevant KPIs):

{required_kpis}

After the analysis of each standard, provide a concise executive summary that includes:
1. One key strength for each standard (exactly one, the most significant)
2. The main weaknesses that require immediate attention (prioritized)
3. The corresponding recommendations for these critical weaknesses
4. An overall assessment of the program's compliance level

Format the report in Markdown with proper headings and tables.
Make all tables full-width and ensure consistent formatting throughout.
Use bullet points for all lists within table cells.
{missing_data_instruction}"#;

/// KPI phrases the report must include per standard, in report order.
pub const REQUIRED_KPIS: &[(&str, &[&str])] = &[
    (
        "Section A: PROGRAM MANAGEMENT and QUALITY ASSURANCE",
        &[
            "Percentage of achieved program operational plan objectives (Target: %)",
            "Program satisfaction rate from stakeholders (Target: %)",
            "Number of quality improvement initiatives implemented per year (Target: #)",
        ],
    ),
    (
        "Standard 2: TEACHING and LEARNING",
        &[
            "Students' overall satisfaction with learning experience (Target: %)",
            "Course satisfaction rate (Target: %)",
            "Employer satisfaction rate with graduates' performance (Target: %)",
            "Course completion rate (Target: %)",
        ],
    ),
    (
        "Standard 3: STUDENTS",
        &[
            "Student-to-faculty ratio (Target: #:1)",
            "Average time to graduation (Target: # years)",
            "Student retention rate (Target: %)",
            "Graduate employment rate within 6 months (Target: %)",
        ],
    ),
    (
        "Standard 4: FACULTY",
        &[
            "Percentage of faculty with terminal degrees (Target: %)",
            "Faculty retention rate (Target: %)",
            "Faculty research publications per year (Target: # per faculty)",
            "Faculty professional development participation rate (Target: %)",
        ],
    ),
    (
        "Standard 5: LEARNING RESOURCES, FACILITIES, and EQUIPMENT",
        &[
            "Student satisfaction with learning resources (Target: %)",
            "Faculty satisfaction with teaching facilities (Target: %)",
            "Resource utilization rate (Target: %)",
            "Annual technology refresh rate (Target: %)",
        ],
    ),
];

/// System prompt for free-form accreditation questions.
pub const ASK_SYSTEM: &str = "You are an expert in university program accreditation and assessment. \
    Provide clear, professional advice.";

/// Q&A prompt template. Replace `{question}` before sending.
pub const ASK_PROMPT_TEMPLATE: &str = r#"You are an accreditation consultant specializing in university program assessment.

Answer the following question about accreditation:

Question: {question}

Instructions:
- Always give a clear, direct, and professional answer first.
- If the question is factual (e.g., "which body," "how long," "what is"), provide only the factual answer with relevant details or examples. Do NOT add recommendations unless explicitly asked.
- If the question is advisory (e.g., "how should we," "what steps," "ways to improve"), then provide practical, actionable recommendations aligned with accreditation standards.
- When relevant, mention examples of accreditation bodies (ABET, AACSB, NCAAA, etc.) or best practices, but keep the focus on directly answering the question.
- Avoid repeating definitions or explaining accreditation unless the question explicitly requests it.
- Keep responses concise, professional, and to the point."#;
