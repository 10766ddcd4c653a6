use crate::plan::PatientInput;

/// Header that opens the personalized plan section of a completion
pub const PLAN_HEADER: &str = "Personalized Plan:";

/// Header that opens the healthy solutions section of a completion
pub const SOLUTIONS_HEADER: &str = "Healthy Solutions:";

/// Closing line the model is asked to end the healthy solutions with
pub const CLOSING_LINE: &str =
    "Reach out to our team for any support or questions. We are here to help! - Kayla";

const SERVICE_SCOPE: &str = "Generate a care plan for a medical clinic that offers weight loss, \
hormone replacement therapy, hair transplants, general practice, mens ed treatment using ICI or \
gainswave and prp, and mental health counseling; based on the following patient data:";

/// Clinic rules, in the order they are presented to the model.
pub const PLAN_RULES: &[&str] = &[
    "A personalized plan with at least 3 specific actions.",
    "A list of healthy solutions with at least 3 items.",
    "Do not mention specialists, nutritionists, dieticians or fitness trainers.",
    "If PCOS or Diabetes are explicitly mentioned, suggest a low carb diet for PCOS or Diabetes \
associated with weight loss. Only suggest it for the condition that is mentioned, never both, and \
do not suggest it if neither is mentioned.",
    "If a sleep study is mentioned, suggest a possible sleep study prescribed by our doctor.",
    "Keep answers brief, professional and simple and in line with our services, don't suggest \
outside suggestions or use the patient's name.",
    "If patient is on TRT or HRT mention that we will recheck labs at 6 weeks to monitor progress.",
    "If patient has low vitamin D mention to take 5,000 IU/day, recheck at 3 months.",
    "If high A1C is mentioned, include exactly: \"We will review your A1C at 6 weeks, and if it is \
not managed we will consult with the doctor about semaglutide dosage changes or metformin.\"",
    "Do not use asterisks, bullet points or any markdown formatting in the response.",
    "If high estrogen or high estradiol is mentioned, include exactly: \"Take 2 DIM daily to help \
support healthy estrogen levels.\"",
    "Diet and general health advice belongs only in Healthy Solutions, never in the Personalized \
Plan.",
    "Do not suggest a service the patient is already receiving.",
    "If low energy is mentioned, suggest a daily essential multivitamin.",
    "If the goals or objectives indicate a mental health concern such as anxiety, depression or \
stress, suggest speaking with our mental health counselor. Only do this when the context \
warrants it.",
];

/// Build the care plan prompt for a patient.
///
/// The patient name is deliberately left out; everything else the model needs
/// is rendered in a fixed order so the response parser can rely on the
/// section headers.
pub fn build_plan_prompt(patient: &PatientInput) -> String {
    let goals = numbered(patient.goals());
    let objectives = numbered(patient.objectives());
    let rules = numbered(PLAN_RULES.iter().copied());

    format!(
        "{SERVICE_SCOPE}\n\
\n\
Date of Birth: {dob}\n\
Service: {service}\n\
\n\
Goals:\n\
{goals}\n\
\n\
Objectives:\n\
{objectives}\n\
\n\
Please provide:\n\
\n\
{rules}\n\
\n\
Format the response as follows:\n\
\n\
{PLAN_HEADER}\n\
1. [Action 1]\n\
2. [Action 2]\n\
3. [Action 3]\n\
\n\
{SOLUTIONS_HEADER}\n\
1. [Solution 1]\n\
2. [Solution 2]\n\
3. [Solution 3]\n\
4. {CLOSING_LINE}",
        dob = patient.date_of_birth,
        service = patient.service,
    )
}

fn numbered<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}
