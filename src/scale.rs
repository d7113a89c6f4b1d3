use serde::Serialize;

pub const BUCKET_COUNT: usize = 7;

/// One point on the consumption (🍰) to investment (🚀) scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScaleBucket {
    pub index: usize,
    pub label: &'static str,
    pub value: u8,
    pub color: &'static str,
}

static SCALE: [ScaleBucket; BUCKET_COUNT] = [
    ScaleBucket { index: 0, label: "🍰", value: 1, color: "#e63946" },
    ScaleBucket { index: 1, label: "2", value: 2, color: "#f77f00" },
    ScaleBucket { index: 2, label: "3", value: 3, color: "#fcbf49" },
    ScaleBucket { index: 3, label: "⚖️", value: 4, color: "#a8dadc" },
    ScaleBucket { index: 4, label: "5", value: 5, color: "#2a9d8f" },
    ScaleBucket { index: 5, label: "6", value: 6, color: "#378d96" },
    ScaleBucket { index: 6, label: "🚀", value: 7, color: "#457b9d" },
];

pub fn buckets() -> &'static [ScaleBucket; BUCKET_COUNT] {
    &SCALE
}

/// Looks up a bucket by a stored scale value. Anything outside 0..=6 is `None`.
pub fn bucket(scale: i64) -> Option<&'static ScaleBucket> {
    usize::try_from(scale).ok().and_then(|index| SCALE.get(index))
}

pub fn axis_label(bucket: &ScaleBucket) -> String {
    format!("{} ({})", bucket.label, bucket.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_are_ordered_and_value_is_index_plus_one() {
        let all = buckets();
        assert_eq!(all.len(), 7);
        for (position, bucket) in all.iter().enumerate() {
            assert_eq!(bucket.index, position);
            assert_eq!(usize::from(bucket.value), position + 1);
        }
        assert!(all.windows(2).all(|pair| pair[0].value < pair[1].value));
    }

    #[test]
    fn bucket_lookup_rejects_out_of_range() {
        assert_eq!(bucket(0).map(|b| b.value), Some(1));
        assert_eq!(bucket(6).map(|b| b.value), Some(7));
        assert!(bucket(7).is_none());
        assert!(bucket(-1).is_none());
    }

    #[test]
    fn axis_label_includes_numeric_value() {
        assert_eq!(axis_label(&buckets()[0]), "🍰 (1)");
        assert_eq!(axis_label(&buckets()[4]), "5 (5)");
    }
}
