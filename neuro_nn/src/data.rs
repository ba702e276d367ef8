//! Training examples.

/// One training example: input values paired with the expected outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingData {
    pub inputs: Vec<f64>,
    pub targets: Vec<f64>,
}

impl TrainingData {
    pub fn new(inputs: impl Into<Vec<f64>>, targets: impl Into<Vec<f64>>) -> Self {
        TrainingData {
            inputs: inputs.into(),
            targets: targets.into(),
        }
    }
}

impl<I, T> From<(I, T)> for TrainingData
where
    I: Into<Vec<f64>>,
    T: Into<Vec<f64>>,
{
    fn from((inputs, targets): (I, T)) -> Self {
        TrainingData::new(inputs, targets)
    }
}

/// The four XOR examples, in the order `[1,1], [1,0], [0,1], [0,0]`.
pub fn xor_examples() -> Vec<TrainingData> {
    vec![
        TrainingData::new([1.0, 1.0], [0.0]),
        TrainingData::new([1.0, 0.0], [1.0]),
        TrainingData::new([0.0, 1.0], [1.0]),
        TrainingData::new([0.0, 0.0], [0.0]),
    ]
}
