use crate::models::attempt::AnswerSheet;
use crate::models::quiz::Question;

/// 得分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub score: usize,
    pub total: usize,
}

impl Score {
    /// 百分比，四舍五入；没有题目时为 0
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.score as f64 / self.total as f64) * 100.0).round() as u32
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.score, self.total)
    }
}

/// 计算得分
///
/// `questions` 必须是作答时呈现的题目（答案下标已按打乱后的选项重算）。
/// 未作答的题不计分。
pub fn score(questions: &[Question], answers: &AnswerSheet) -> Score {
    let correct = questions
        .iter()
        .enumerate()
        .filter(|(i, q)| answers.get(*i) == Some(q.answer))
        .count();

    Score {
        score: correct,
        total: questions.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions() -> Vec<Question> {
        (0..4)
            .map(|i| {
                Question::new(
                    format!("q{}", i),
                    vec!["a".into(), "b".into(), "c".into(), "d".into()],
                    i,
                    10,
                )
            })
            .collect()
    }

    #[test]
    fn test_empty_answers_score_zero() {
        let s = score(&questions(), &AnswerSheet::new());
        assert_eq!(s, Score { score: 0, total: 4 });
        assert_eq!(s.percent(), 0);
    }

    #[test]
    fn test_only_matching_answers_count() {
        let answers: AnswerSheet = vec![Some(0), Some(0), None, Some(3)].into();
        let s = score(&questions(), &answers);
        assert_eq!(s.score, 2);
        assert_eq!(s.to_string(), "2/4");
        assert_eq!(s.percent(), 50);
    }

    #[test]
    fn test_adding_correct_answers_never_lowers_score() {
        let qs = questions();
        let mut answers = AnswerSheet::new();
        answers.record(1, 3);
        let mut last = score(&qs, &answers);

        for i in [0, 2, 3] {
            answers.record(i, qs[i].answer);
            let next = score(&qs, &answers);
            assert!(next.score >= last.score);
            assert_eq!(next, score(&qs, &answers));
            last = next;
        }
        assert_eq!(last.score, 3);
    }

    #[test]
    fn test_no_questions() {
        let s = score(&[], &AnswerSheet::new());
        assert_eq!(s, Score::default());
        assert_eq!(s.percent(), 0);
    }
}
