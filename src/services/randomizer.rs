//! 随机打乱 - 业务能力层
//!
//! 均匀随机排列（Fisher–Yates），用于打乱题目顺序和每道题的选项顺序

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::quiz::Question;

/// 原地均匀打乱序列，长度不超过 1 时不变
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// 生成 `0..len` 的均匀随机排列
pub fn permutation<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..len).collect();
    shuffle(&mut idx, rng);
    idx
}

/// 打乱选项并返回正确答案的新下标
///
/// 新下标是原正确选项在新顺序中的位置，而不是沿用旧下标。
/// 原下标越界时原样返回（越界答案永远不会被判对）。
pub fn shuffle_options<R: Rng + ?Sized>(
    options: &mut Vec<String>,
    answer: usize,
    rng: &mut R,
) -> usize {
    if options.len() <= 1 {
        return answer;
    }

    let idx = permutation(options.len(), rng);
    let reordered: Vec<String> = idx.iter().map(|&i| options[i].clone()).collect();
    *options = reordered;

    idx.iter().position(|&i| i == answer).unwrap_or(answer)
}

/// 打乱单道题的选项，同步更新答案下标
pub fn shuffle_question<R: Rng + ?Sized>(question: &mut Question, rng: &mut R) {
    question.answer = shuffle_options(&mut question.options, question.answer, rng);
}

/// 打乱题目顺序，再分别打乱每道题的选项
pub fn shuffle_questions<R: Rng + ?Sized>(questions: &mut [Question], rng: &mut R) {
    shuffle(questions, rng);
    for q in questions.iter_mut() {
        shuffle_question(q, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn four_options() -> Vec<String> {
        vec!["3".into(), "4".into(), "5".into(), "6".into()]
    }

    #[test]
    fn test_correct_option_follows_shuffle() {
        let mut rng = StdRng::seed_from_u64(7);
        for answer in 0..4 {
            for _ in 0..50 {
                let original = four_options();
                let mut options = original.clone();
                let new_answer = shuffle_options(&mut options, answer, &mut rng);

                assert_eq!(options[new_answer], original[answer]);

                let mut sorted = options.clone();
                sorted.sort();
                assert_eq!(sorted, original);
            }
        }
    }

    #[test]
    fn test_single_option_is_noop() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut q = Question::new("only", vec!["yes".into()], 0, 10);

        shuffle_question(&mut q, &mut rng);

        assert_eq!(q.options, vec!["yes".to_string()]);
        assert_eq!(q.answer, 0);

        let mut questions = vec![q.clone()];
        shuffle_questions(&mut questions, &mut rng);
        assert_eq!(questions, vec![q]);
    }

    #[test]
    fn test_out_of_range_answer_is_kept() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut options = four_options();
        assert_eq!(shuffle_options(&mut options, 9, &mut rng), 9);
    }

    #[test]
    fn test_permutation_is_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts: HashMap<Vec<usize>, usize> = HashMap::new();
        for _ in 0..6000 {
            *counts.entry(permutation(3, &mut rng)).or_default() += 1;
        }

        assert_eq!(counts.len(), 6);
        for (perm, count) in counts {
            assert!(
                (800..=1200).contains(&count),
                "排列 {:?} 出现 {} 次",
                perm,
                count
            );
        }
    }

    #[test]
    fn test_shuffle_questions_keeps_every_question() {
        let mut rng = StdRng::seed_from_u64(11);
        let original: Vec<Question> = (0..5)
            .map(|i| Question::new(format!("q{}", i), four_options(), i % 4, 10))
            .collect();

        let mut questions = original.clone();
        shuffle_questions(&mut questions, &mut rng);

        for q in &questions {
            let src = original.iter().find(|o| o.question == q.question).unwrap();
            assert_eq!(q.correct_option(), src.correct_option());
        }
    }
}
