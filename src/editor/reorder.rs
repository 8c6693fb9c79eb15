//! 순서 있는 목록 조작 (splice 방식)

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("index {index} is out of range for a list of {len}")]
    OutOfRange { index: usize, len: usize },
    #[error("no item with id {0}")]
    UnknownId(String),
}

/// `from` 위치의 항목을 빼서 `to` 위치에 끼워 넣습니다.
///
/// 나머지 항목들의 상대 순서는 유지됩니다.
/// `to`는 "항목을 뺀 뒤의 목록" 기준이 아니라 최종 위치입니다
/// (드래그 앤 드롭에서 놓은 자리의 인덱스와 같음).
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<(), ListError> {
    let len = items.len();
    for index in [from, to] {
        if index >= len {
            return Err(ListError::OutOfRange { index, len });
        }
    }
    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
    Ok(())
}

/// `index` 바로 뒤에 항목을 넣고 새 위치를 반환합니다.
pub fn insert_after<T>(items: &mut Vec<T>, index: usize, item: T) -> usize {
    let at = (index + 1).min(items.len());
    items.insert(at, item);
    at
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn moves_forward_and_backward() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        move_item(&mut items, 0, 2).unwrap();
        assert_eq!(items, vec!['b', 'c', 'a', 'd']);
        move_item(&mut items, 3, 0).unwrap();
        assert_eq!(items, vec!['d', 'b', 'c', 'a']);
    }

    #[test]
    fn rejects_out_of_range() {
        let mut items = vec![1, 2];
        assert_eq!(move_item(&mut items, 0, 2), Err(ListError::OutOfRange { index: 2, len: 2 }));
        assert_eq!(items, vec![1, 2]);
    }

    #[test]
    fn insert_after_last_appends() {
        let mut items = vec![1, 2];
        assert_eq!(insert_after(&mut items, 1, 3), 2);
        assert_eq!(insert_after(&mut items, 0, 9), 1);
        assert_eq!(items, vec![1, 9, 2, 3]);
    }

    proptest! {
        #[test]
        fn move_preserves_members_and_relative_order(
            len in 1usize..40,
            from_seed in any::<usize>(),
            to_seed in any::<usize>(),
        ) {
            let original: Vec<usize> = (0..len).collect();
            let (from, to) = (from_seed % len, to_seed % len);
            let mut items = original.clone();
            move_item(&mut items, from, to).unwrap();

            prop_assert_eq!(items[to], from);

            let mut sorted = items.clone();
            sorted.sort();
            prop_assert_eq!(&sorted, &original);

            let untouched: Vec<usize> = items.iter().copied().filter(|&v| v != from).collect();
            let expected: Vec<usize> = original.iter().copied().filter(|&v| v != from).collect();
            prop_assert_eq!(untouched, expected);
        }
    }
}
