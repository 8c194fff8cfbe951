use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub const TRAIN_RATIO: f64 = 0.8;
pub const SEED: u64 = 42;

/// Shuffle `rows` with a seeded RNG and cut it in two: the first
/// `floor(len * ratio)` rows train, the rest test.
pub fn train_test_split<T>(mut rows: Vec<T>, ratio: f64, seed: u64) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);
    rows.shuffle(&mut rng);
    let train_len = ((rows.len() as f64 * ratio.clamp(0.0, 1.0)).floor() as usize).min(rows.len());
    let test = rows.split_off(train_len);
    (rows, test)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sizes_floor() {
        let (train, test) = train_test_split((0..11).collect::<Vec<_>>(), 0.8, SEED);
        assert_eq!(train.len(), 8);
        assert_eq!(test.len(), 3);
    }

    #[test]
    fn test_split_is_a_partition_and_seeded() {
        let rows: Vec<u32> = (0..50).collect();
        let (a_train, a_test) = train_test_split(rows.clone(), TRAIN_RATIO, 7);
        let (b_train, b_test) = train_test_split(rows.clone(), TRAIN_RATIO, 7);
        assert_eq!(a_train, b_train);
        assert_eq!(a_test, b_test);

        let mut all: Vec<u32> = a_train.into_iter().chain(a_test).collect();
        all.sort_unstable();
        assert_eq!(all, rows);
    }

    #[test]
    fn test_split_empty() {
        let (train, test) = train_test_split(Vec::<u8>::new(), 0.8, SEED);
        assert!(train.is_empty() && test.is_empty());
    }
}
