/// One labeled training example. Binary labels: 0 for the negative
/// class (normal / non-TC), 1 for the positive class.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Sample<T> {
    pub data: T,
    pub label: u32,
}

impl<T> Sample<T> {
    pub fn new(data: T, label: u32) -> Self {
        Self { data, label }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Sample<U> {
        Sample {
            data: f(self.data),
            label: self.label,
        }
    }
}

/// Splits two per-class example lists into train and validation by
/// simple index slicing: the first `train_count` of each class go to
/// train, the remainder to validation. No shuffling and no balancing
/// correction; a class shorter than `train_count` just contributes
/// everything it has to train.
pub fn split_by_class<T>(
    positive: Vec<Sample<T>>,
    negative: Vec<Sample<T>>,
    train_count: usize,
) -> (Vec<Sample<T>>, Vec<Sample<T>>) {
    let mut train = Vec::new();
    let mut validation = Vec::new();

    for mut class in [positive, negative] {
        let rest = class.split_off(train_count.min(class.len()));
        train.extend(class);
        validation.extend(rest);
    }

    (train, validation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labeled(label: u32, count: usize) -> Vec<Sample<usize>> {
        (0..count).map(|i| Sample::new(i, label)).collect()
    }

    #[test]
    fn first_n_of_each_class_go_to_train() {
        let (train, validation) = split_by_class(labeled(1, 100), labeled(0, 100), 70);

        assert_eq!(train.len(), 140);
        assert_eq!(validation.len(), 60);

        // order within each class is preserved, positives first
        assert_eq!(train[0].data, 0);
        assert_eq!(train[69].data, 69);
        assert_eq!(train[70].label, 0);
        assert_eq!(validation[0].data, 70);
    }

    #[test]
    fn short_class_contributes_everything_to_train() {
        let (train, validation) = split_by_class(labeled(1, 40), labeled(0, 100), 70);

        assert_eq!(train.len(), 40 + 70);
        assert_eq!(validation.len(), 30);
        assert!(validation.iter().all(|s| s.label == 0));
    }

    #[test]
    fn map_keeps_the_label() {
        let sample = Sample::new(3usize, 1).map(|v| v * 2);
        assert_eq!(sample.data, 6);
        assert_eq!(sample.label, 1);
    }
}
