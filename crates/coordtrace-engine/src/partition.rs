/// Splits a candidate-user list into `n_workers * 10` contiguous batches
/// (minimum batch size 1). Over-partitioning by 10x dampens stragglers: a
/// worker that draws an unusually expensive batch doesn't stall the whole
/// pool, since there are nine more batches behind it to pick up the slack.
pub fn partition_into_batches(users: Vec<String>, n_workers: usize) -> Vec<Vec<String>> {
    if users.is_empty() {
        return Vec::new();
    }

    let target_batches = n_workers.max(1) * 10;
    let batch_size = users.len().div_ceil(target_batches).max(1);

    users
        .chunks(batch_size)
        .map(|chunk| chunk.to_vec())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("user-{i}")).collect()
    }

    #[test]
    fn empty_input_yields_no_batches() {
        assert!(partition_into_batches(Vec::new(), 4).is_empty());
    }

    #[test]
    fn every_user_appears_exactly_once_across_batches() {
        let input = users(137);
        let batches = partition_into_batches(input.clone(), 4);

        let mut flattened: Vec<String> = batches.into_iter().flatten().collect();
        flattened.sort();
        let mut expected = input;
        expected.sort();
        assert_eq!(flattened, expected);
    }

    #[test]
    fn batch_count_never_exceeds_target_batches() {
        let batches = partition_into_batches(users(5), 4);
        assert!(batches.len() <= 40);
    }

    #[test]
    fn a_single_user_still_yields_one_batch() {
        let batches = partition_into_batches(users(1), 4);
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 1);
    }
}
