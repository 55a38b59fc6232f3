use chrono::NaiveDate;
use csv::{QuoteStyle, WriterBuilder};

use crate::{entities::experience::InterviewExperience, errors::AppError};

const HEADERS: [&str; 15] = [
    "ID",
    "Student Name",
    "LinkedIn URL",
    "Company",
    "Position",
    "Interview Dates",
    "Phone Screens",
    "Technical Interviews",
    "Behavioral Interviews",
    "Other Interviews",
    "Interview Questions",
    "Advice/Tips",
    "Anonymous",
    "Status",
    "Created At",
];

/// A rendered CSV document ready to be sent as an attachment.
#[derive(Debug)]
pub struct CsvExport {
    pub filename: String,
    pub body: String,
}

pub fn export_filename(date: NaiveDate) -> String {
    format!("interview-experiences-{}.csv", date.format("%Y-%m-%d"))
}

/// Renders one header row followed by one row per experience.
///
/// Fields containing the separator, a quote or a line break are quoted, with
/// embedded quotes doubled.
pub fn render_experiences(experiences: &[InterviewExperience]) -> Result<String, AppError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(HEADERS)?;

    for exp in experiences {
        let dates = exp.interview_dates
            .iter()
            .map(|d| format!("{}: {}", d.label, d.date))
            .collect::<Vec<_>>()
            .join("; ");

        writer.write_record([
            exp.id.to_string(),
            exp.student_name.clone(),
            exp.linkedin_url.clone(),
            exp.company.clone(),
            exp.position.clone(),
            dates,
            exp.phone_screens.to_string(),
            exp.technical_interviews.to_string(),
            exp.behavioral_interviews.to_string(),
            exp.other_interviews.to_string(),
            exp.interview_questions.clone(),
            exp.advice_tips.clone(),
            exp.is_anonymous.to_string(),
            exp.status.to_string(),
            exp.created_at.to_rfc3339(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::InternalError(format!("CSV flush failed: {}", e)))?;

    String::from_utf8(bytes)
        .map_err(|e| AppError::InternalError(format!("CSV output was not UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::experience::{ExperienceStatus, InterviewDate};
    use chrono::{TimeZone, Utc};
    use sqlx::types::Json;
    use uuid::Uuid;

    fn approved(company: &str, questions: &str) -> InterviewExperience {
        let created = Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap();
        InterviewExperience {
            id: Uuid::nil(),
            student_name: "Ada Lovelace".into(),
            linkedin_url: "https://linkedin.com/in/ada".into(),
            company: company.into(),
            position: "Intern".into(),
            interview_dates: Json(vec![
                InterviewDate { label: "Applied".into(), date: "2025-01-02".into() },
                InterviewDate { label: "Offer".into(), date: "2025-02-20".into() },
            ]),
            phone_screens: 1,
            technical_interviews: 2,
            behavioral_interviews: 1,
            other_interviews: 0,
            interview_questions: questions.into(),
            advice_tips: "Practice every day".into(),
            is_anonymous: false,
            status: ExperienceStatus::Approved,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn writes_a_single_header_row() {
        let csv = render_experiences(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
        assert!(csv.starts_with("ID,Student Name,LinkedIn URL,Company,Position,Interview Dates"));
    }

    #[test]
    fn renders_dates_and_counts() {
        let csv = render_experiences(&[approved("Acme", "Reverse a linked list")]).unwrap();
        let row = csv.lines().nth(1).unwrap();

        assert!(row.starts_with("00000000-0000-0000-0000-000000000000,Ada Lovelace,"));
        assert!(row.contains("Applied: 2025-01-02; Offer: 2025-02-20"));
        assert!(row.contains(",1,2,1,0,"));
        assert!(row.ends_with(",false,approved,2025-03-14T09:30:00+00:00"));
    }

    #[test]
    fn quotes_separators_and_doubles_embedded_quotes() {
        let csv = render_experiences(&[approved("Acme, Inc.", "What does \"idempotent\" mean?")]).unwrap();
        let row = csv.lines().nth(1).unwrap();

        assert!(row.contains("\"Acme, Inc.\""));
        assert!(row.contains("\"What does \"\"idempotent\"\" mean?\""));
    }

    #[test]
    fn filename_carries_the_date() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(export_filename(date), "interview-experiences-2025-06-01.csv");
    }
}
