use proptest::prelude::*;
use pullseq::prelude::*;

fn arb_items() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-50i32..50, 0..40)
}

fn from_unfold(items: Vec<i32>) -> Seq<impl Source<Item = i32, Error = std::convert::Infallible>> {
    unfold(0usize, move |i| items.get(i).map(|x| (*x, i + 1)))
}

// =============================================================================
// Construction
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_container_round_trip(items in arb_items()) {
        prop_assert_eq!(from_vec(items.clone()).to_vec(), items);
    }

    #[test]
    fn test_range_yields_every_integer(lo in -100i64..100, hi in -100i64..100) {
        let values = range(lo, hi).to_vec();
        prop_assert_eq!(values.len() as i64, (hi - lo).max(0));
        prop_assert_eq!(values, (lo..hi).collect::<Vec<_>>());
    }

    #[test]
    fn test_repeat_length(n in 0usize..64) {
        prop_assert_eq!(repeat('z', n).count(), n);
    }
}

// =============================================================================
// Windowing
// =============================================================================

proptest! {
    #[test]
    fn test_take_is_a_prefix(items in arb_items(), n in 0usize..50) {
        let taken = from_vec(items.clone()).take(n).to_vec();
        prop_assert_eq!(taken.len(), n.min(items.len()));
        prop_assert_eq!(&taken[..], &items[..taken.len()]);
    }

    #[test]
    fn test_take_then_skip_reconstructs(items in arb_items(), n in 0usize..50) {
        let mut joined = from_vec(items.clone()).take(n).to_vec();
        joined.extend(from_vec(items.clone()).skip(n).to_vec());
        prop_assert_eq!(joined, items);
    }

    #[test]
    fn test_slice_matches_std(items in arb_items(), start in 0usize..45, end in 0usize..45) {
        let sliced = from_vec(items.clone()).slice(start, end).to_vec();
        let expected: Vec<i32> = items.iter().copied().skip(start).take(end.saturating_sub(start)).collect();
        prop_assert_eq!(sliced, expected);
    }

    #[test]
    fn test_filter_keeps_only_accepted(items in arb_items(), m in 1i32..5) {
        let kept = from_vec(items.clone()).filter(move |x| x % m == 0).to_vec();
        prop_assert!(kept.iter().all(|x| x % m == 0));
        prop_assert_eq!(kept, items.iter().copied().filter(|x| x % m == 0).collect::<Vec<_>>());
        prop_assert_eq!(from_vec(items.clone()).filter(|_| true).to_vec(), items);
    }
}

// =============================================================================
// Alignment
// =============================================================================

proptest! {
    #[test]
    fn test_zip_with_is_positional(left in arb_items(), right in arb_items()) {
        let sums = zip_with(|a, b| a + b, from_vec(left.clone()), from_vec(right.clone())).to_vec();
        prop_assert_eq!(sums.len(), left.len().min(right.len()));
        for (i, sum) in sums.iter().enumerate() {
            prop_assert_eq!(*sum, left[i] + right[i]);
        }
    }

    #[test]
    fn test_zip_stays_aligned_on_skipping_inputs(
        left in arb_items(),
        right in arb_items(),
        threshold in -50i32..50,
    ) {
        let evens = from_vec(left.clone()).filter(|x| x % 2 == 0);
        let tail = from_vec(right.clone()).skip_while(move |x| *x < threshold);
        let zipped = evens.zip(tail).to_vec();

        let expected_left: Vec<i32> = left.iter().copied().filter(|x| x % 2 == 0).collect();
        let expected_right: Vec<i32> = right.iter().copied().skip_while(|x| *x < threshold).collect();
        let expected: Vec<(i32, i32)> = expected_left.into_iter().zip(expected_right).collect();
        prop_assert_eq!(zipped, expected);
    }

    #[test]
    fn test_append_concatenates(left in arb_items(), right in arb_items()) {
        let joined = append(from_vec(left.clone()), from_vec(right.clone())).to_vec();
        prop_assert_eq!(joined, [left, right].concat());
    }
}

// =============================================================================
// Equality
// =============================================================================

proptest! {
    #[test]
    fn test_same_elements_is_reflexive(items in arb_items()) {
        let mut seq = from_vec(items);
        let mut again = seq.clone();
        prop_assert!(same_elements(&mut seq, &mut again));
    }

    #[test]
    fn test_same_elements_is_symmetric(left in arb_items(), right in arb_items()) {
        let forward = same_elements(&mut from_vec(left.clone()), &mut from_vec(right.clone()));
        let backward = same_elements(&mut from_vec(right), &mut from_vec(left));
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn test_same_elements_across_constructors(left in arb_items(), right in arb_items()) {
        let equal = left == right;
        prop_assert_eq!(same_elements(&mut from_vec(left.clone()), &mut from_unfold(right.clone())), equal);
        prop_assert!(same_elements(&mut from_vec(left.clone()), &mut from_unfold(left.clone())));
    }

    #[test]
    fn test_same_elements_ignores_skips(items in arb_items(), m in 1i32..4) {
        let expected: Vec<i32> = items.iter().copied().filter(|x| x % m != 0).collect();
        let mut filtered = from_vec(items).filter(move |x| x % m != 0);
        prop_assert!(same_elements(&mut from_vec(expected), &mut filtered));
    }
}
