//! Answer extraction: find where each known question is restated in a
//! free-text submission and harvest the text that follows it.

mod batch;
mod boundary;
mod document;
mod extractor;
mod labeled;
mod model;
mod pairing;
mod submissions;

pub use batch::{BatchReport, BatchRunner};
pub use boundary::{find_boundaries, is_numbered_marker, next_boundary};
pub use document::Document;
pub use extractor::{Extractor, extract, extract_json};
pub use labeled::parse_labeled_answers;
pub use model::parse_model_answers;
pub use pairing::{StudentAnswer, pair_with_model};
pub use submissions::{
    SUBMISSION_FILE, SUBMISSIONS_DIR, Submission, SubmissionScanner, find_model_file,
};

#[cfg(test)]
mod tests {
    use super::*;
    use sift_core::{MatchConfig, MemorySink, QuestionBank};

    const MODEL: &str = "Club Assessment\n\n\
                         1) What is a scrum?\nA set piece where forwards bind.\n\n\
                         2) Explain the offside rule\nPlayers in front of the ball are out of play.\n";

    #[test]
    fn model_file_drives_extraction_and_pairing() {
        let model = parse_model_answers(MODEL);
        let bank = QuestionBank::from_model_answers(&model);

        let submission = "My answers\n\
                          Explain the offside rule\n\
                          You must stay behind the ball.\n\
                          What is a scrum?\n\
                          Forwards bind and push.";

        let sink = MemorySink::new();
        let extractor = Extractor::new(MatchConfig::default(), &sink).unwrap();
        let answers = extractor.extract(submission, &bank);
        let items = pair_with_model(&model, &answers);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].question_id, 1);
        assert_eq!(items[0].student_answer, "Forwards bind and push.");
        assert_eq!(items[1].question_id, 2);
        assert_eq!(
            items[1].student_answer,
            "You must stay behind the ball.\nWhat is a scrum?\nForwards bind and push."
        );
        assert_eq!(items[1].model_answer, "Players in front of the ball are out of play.");
    }

    #[test]
    fn labeled_answers_pair_without_matching() {
        let model = parse_model_answers(MODEL);
        let labeled = parse_labeled_answers("2. Stay onside\n1. Bind and push\n");
        let items = pair_with_model(&model, &labeled);

        let ids: Vec<u64> = items.iter().map(|i| i.question_id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(items[0].question, "Explain the offside rule");
    }
}
