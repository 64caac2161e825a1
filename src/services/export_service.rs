use crate::error::{Error, Result};
use crate::models::question::QuizResult;
use crate::models::session::QuizSession;
use bytes::Bytes;
use csv::{QuoteStyle, Terminator, WriterBuilder};

pub const CSV_FILENAME: &str = "quiz_questions.csv";
pub const RAW_FILENAME: &str = "ai_raw_output.txt";

const CSV_HEADER: [&str; 7] = [
    "Type",
    "Question",
    "Option A",
    "Option B",
    "Option C",
    "Option D",
    "Answer",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: &'static str,
    pub content_type: &'static str,
    pub body: Bytes,
}

impl ExportFile {
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}

pub struct ExportService;

impl ExportService {
    /// Picks exactly one export for the session: CSV when any question exists,
    /// otherwise the raw model output, otherwise nothing.
    pub fn export(session: &QuizSession) -> Result<Option<ExportFile>> {
        let structured = session.structured();
        if !structured.is_empty() {
            let body = Self::generate_quiz_csv(structured)?;
            return Ok(Some(ExportFile {
                filename: CSV_FILENAME,
                content_type: "text/csv; charset=utf-8",
                body: Bytes::from(body),
            }));
        }

        if !session.raw().is_empty() {
            return Ok(Some(ExportFile {
                filename: RAW_FILENAME,
                content_type: "text/plain; charset=utf-8",
                body: Bytes::from(session.raw().to_owned()),
            }));
        }

        Ok(None)
    }

    pub fn generate_quiz_csv(quiz: &QuizResult) -> Result<Vec<u8>> {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(CSV_HEADER)?;

        for q in &quiz.mcqs {
            writer.write_record([
                "MCQ",
                q.question.as_str(),
                q.options[0].as_str(),
                q.options[1].as_str(),
                q.options[2].as_str(),
                q.options[3].as_str(),
                q.answer.as_str(),
            ])?;
        }

        for q in &quiz.true_false {
            writer.write_record([
                "True/False",
                q.question.as_str(),
                "",
                "",
                "",
                "",
                q.answer.as_str(),
            ])?;
        }

        writer
            .into_inner()
            .map_err(|e| Error::Internal(format!("Failed to flush CSV export: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::{McqItem, TrueFalseItem};

    fn quiz() -> QuizResult {
        QuizResult {
            mcqs: vec![
                McqItem {
                    question: "2+2?".into(),
                    options: ["3".into(), "4".into(), "5".into(), "6".into()],
                    answer: "4".into(),
                },
                McqItem {
                    question: r#"He said "hi""#.into(),
                    options: ["a, b".into(), String::new(), String::new(), String::new()],
                    answer: "A".into(),
                },
            ],
            true_false: vec![TrueFalseItem {
                question: "Rust has a garbage collector".into(),
                answer: "False".into(),
            }],
        }
    }

    #[test]
    fn csv_rows_are_fully_quoted() {
        let session = QuizSession::from_parts(quiz(), "");
        let file = ExportService::export(&session).unwrap().expect("csv export");
        assert_eq!(file.filename, CSV_FILENAME);

        let text = String::from_utf8(file.body.to_vec()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            r#""Type","Question","Option A","Option B","Option C","Option D","Answer""#
        );
        assert_eq!(lines[1], r#""MCQ","2+2?","3","4","5","6","4""#);
        assert_eq!(lines[2], r#""MCQ","He said ""hi""","a, b","","","","A""#);
        assert_eq!(
            lines[3],
            r#""True/False","Rust has a garbage collector","","","","","False""#
        );
    }

    #[test]
    fn csv_parses_back_to_the_source_model() {
        let quiz = quiz();
        let body = ExportService::generate_quiz_csv(&quiz).unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(body.as_slice());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

        assert_eq!(rows.len(), quiz.len() + 1);
        for (row, q) in rows[1..].iter().zip(quiz.mcqs.iter()) {
            assert_eq!(&row[0], "MCQ");
            assert_eq!(&row[1], q.question);
            assert_eq!(&row[6], q.answer);
        }
        let tf_row = &rows[1 + quiz.mcqs.len()];
        assert_eq!(&tf_row[0], "True/False");
        assert_eq!(&tf_row[1], quiz.true_false[0].question);
        assert_eq!(&tf_row[2], "");
        assert_eq!(&tf_row[6], quiz.true_false[0].answer);
    }

    #[test]
    fn structured_data_takes_priority_over_raw() {
        let session = QuizSession::from_parts(quiz(), "raw model text");
        let file = ExportService::export(&session).unwrap().unwrap();
        assert_eq!(file.filename, CSV_FILENAME);
        assert!(!String::from_utf8_lossy(&file.body).contains("raw model text"));
    }

    #[test]
    fn raw_text_is_exported_verbatim() {
        let raw = "Q1: \"unparsed\"\nA) x\n";
        let session = QuizSession::from_parts(QuizResult::default(), raw);
        let file = ExportService::export(&session).unwrap().unwrap();
        assert_eq!(file.filename, RAW_FILENAME);
        assert_eq!(file.content_type, "text/plain; charset=utf-8");
        assert_eq!(file.body, Bytes::from(raw));
        assert_eq!(
            file.content_disposition(),
            "attachment; filename=\"ai_raw_output.txt\""
        );
    }

    #[test]
    fn empty_session_exports_nothing() {
        let session = QuizSession::new();
        assert!(ExportService::export(&session).unwrap().is_none());
    }
}
