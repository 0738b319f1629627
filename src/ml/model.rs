use burn::{
    module::Param,
    nn::{
        loss::{MseLoss, Reduction},
        Dropout, DropoutConfig,
        Initializer,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::{relu, sigmoid},
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct YieldLstmConfig {
    pub n_features: usize,
    #[config(default = 50)]
    pub lstm1_units: usize,
    #[config(default = 30)]
    pub lstm2_units: usize,
    #[config(default = 20)]
    pub dense_units: usize,
    #[config(default = 0.2)]
    pub dropout: f64,
}

impl YieldLstmConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> YieldLstm<B> {
        let lstm1   = ReluLstmConfig::new(self.n_features, self.lstm1_units).init(device);
        let lstm2   = ReluLstmConfig::new(self.lstm1_units, self.lstm2_units).init(device);
        let dense   = dense_layer(self.lstm2_units, self.dense_units, device);
        let output  = dense_layer(self.dense_units, 1, device);
        let dropout = DropoutConfig::new(self.dropout).init();
        YieldLstm { lstm1, lstm2, dense, output, dropout }
    }
}

// Weights are Glorot-uniform, biases start at zero.
fn glorot() -> Initializer {
    Initializer::XavierUniform { gain: 1.0 }
}

fn dense_layer<B: Backend>(d_input: usize, d_output: usize, device: &B::Device) -> Linear<B> {
    let mut linear = LinearConfig::new(d_input, d_output)
        .with_initializer(glorot())
        .init(device);
    linear.bias = Some(Param::from_tensor(Tensor::zeros([d_output], device)));
    linear
}

/// Packed i, f, g, o bias: zero except the forget slice, which
/// starts at 1 so the cell keeps its state early in training.
fn unit_forget_bias<B: Backend>(d_hidden: usize, device: &B::Device) -> Tensor<B, 1> {
    let values: Vec<f32> = (0..4 * d_hidden)
        .map(|k| if k / d_hidden == 1 { 1.0 } else { 0.0 })
        .collect();
    Tensor::from_data(TensorData::new(values, [4 * d_hidden]), device)
}

// ─── ReLU-gated LSTM layer ────────────────────────────────────────────────────
// Standard LSTM cell, except the candidate and the cell-output
// activation are ReLU instead of tanh:
//
//   [i f g o] = x_t W + h_{t-1} U + b
//   i, f, o   = sigmoid(.)
//   g         = relu(.)
//   c_t       = f * c_{t-1} + i * g
//   h_t       = o * relu(c_t)
//
// Gate order in the packed weight matrix is i, f, g, o.
// The recurrent matrix is Glorot-uniform, not orthogonal.
#[derive(Config, Debug)]
pub struct ReluLstmConfig {
    pub d_input:  usize,
    pub d_hidden: usize,
}

impl ReluLstmConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> ReluLstm<B> {
        let mut input_transform = LinearConfig::new(self.d_input, 4 * self.d_hidden)
            .with_initializer(glorot())
            .init(device);
        input_transform.bias = Some(Param::from_tensor(unit_forget_bias(self.d_hidden, device)));
        let hidden_transform = LinearConfig::new(self.d_hidden, 4 * self.d_hidden)
            .with_bias(false)
            .with_initializer(glorot())
            .init(device);
        ReluLstm { input_transform, hidden_transform, d_hidden: self.d_hidden }
    }
}

#[derive(Module, Debug)]
pub struct ReluLstm<B: Backend> {
    pub input_transform:  Linear<B>,
    pub hidden_transform: Linear<B>,
    pub d_hidden:         usize,
}

impl<B: Backend> ReluLstm<B> {
    /// input: [batch, seq_len, d_input] → hidden states [batch, seq_len, d_hidden]
    pub fn forward(&self, input: Tensor<B, 3>) -> Tensor<B, 3> {
        let [batch_size, seq_len, d_input] = input.dims();
        let device = input.device();
        let h = self.d_hidden;

        let mut hidden = Tensor::<B, 2>::zeros([batch_size, h], &device);
        let mut cell   = Tensor::<B, 2>::zeros([batch_size, h], &device);
        let mut outputs = Vec::with_capacity(seq_len);

        for t in 0..seq_len {
            let x_t = input
                .clone()
                .slice([0..batch_size, t..t + 1, 0..d_input])
                .reshape([batch_size, d_input]);

            let gates = self.input_transform.forward(x_t)
                + self.hidden_transform.forward(hidden);
            let gate = |k: usize| gates.clone().slice([0..batch_size, k * h..(k + 1) * h]);

            let input_gate  = sigmoid(gate(0));
            let forget_gate = sigmoid(gate(1));
            let candidate   = relu(gate(2));
            let output_gate = sigmoid(gate(3));

            cell   = forget_gate * cell + input_gate * candidate;
            hidden = output_gate * relu(cell.clone());

            outputs.push(hidden.clone().reshape([batch_size, 1, h]));
        }

        Tensor::cat(outputs, 1)
    }
}

// ─── Stacked regressor ────────────────────────────────────────────────────────
#[derive(Module, Debug)]
pub struct YieldLstm<B: Backend> {
    pub lstm1:   ReluLstm<B>,
    pub lstm2:   ReluLstm<B>,
    pub dense:   Linear<B>,
    pub output:  Linear<B>,
    pub dropout: Dropout,
}

impl<B: Backend> YieldLstm<B> {
    /// inputs: [batch, seq_len, n_features] → predictions: [batch, 1]
    pub fn forward(&self, inputs: Tensor<B, 3>) -> Tensor<B, 2> {
        // First LSTM keeps the whole sequence
        let x = self.dropout.forward(self.lstm1.forward(inputs));

        // Second LSTM: only the last step goes on
        let x = self.lstm2.forward(x);
        let [batch_size, seq_len, d_hidden] = x.dims();
        let x = x
            .slice([0..batch_size, seq_len - 1..seq_len, 0..d_hidden])
            .reshape([batch_size, d_hidden]);
        let x = self.dropout.forward(x);

        let x = relu(self.dense.forward(x));
        self.output.forward(x)
    }

    /// Forward pass plus mean squared error against targets [batch, 1].
    pub fn forward_loss(
        &self,
        inputs:  Tensor<B, 3>,
        targets: Tensor<B, 2>,
    ) -> (Tensor<B, 1>, Tensor<B, 2>) {
        let output = self.forward(inputs);
        let loss   = MseLoss::new().forward(output.clone(), targets, Reduction::Mean);
        (loss, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_output_shape() {
        let device = Default::default();
        let model: YieldLstm<TestBackend> = YieldLstmConfig::new(12).init(&device);
        let x = Tensor::<TestBackend, 3>::ones([5, 1, 12], &device);
        assert_eq!(model.forward(x).dims(), [5, 1]);
    }

    #[test]
    fn test_lstm_returns_full_sequence() {
        let device = Default::default();
        let lstm: ReluLstm<TestBackend> = ReluLstmConfig::new(4, 7).init(&device);
        let x = Tensor::<TestBackend, 3>::ones([2, 3, 4], &device);
        assert_eq!(lstm.forward(x).dims(), [2, 3, 7]);
    }

    #[test]
    fn test_relu_keeps_hidden_state_non_negative() {
        let device = Default::default();
        let lstm: ReluLstm<TestBackend> = ReluLstmConfig::new(3, 5).init(&device);
        let x = Tensor::<TestBackend, 3>::random(
            [4, 2, 3],
            burn::tensor::Distribution::Normal(0.0, 1.0),
            &device,
        );
        let out: Vec<f32> = lstm.forward(x).into_data().to_vec().unwrap();
        assert!(out.iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn test_biases_start_at_zero_except_forget_gate() {
        let device = Default::default();
        let model: YieldLstm<TestBackend> = YieldLstmConfig::new(3)
            .with_lstm1_units(2)
            .init(&device);

        let bias = |l: &Linear<TestBackend>| -> Vec<f32> {
            l.bias.as_ref().unwrap().val().into_data().to_vec().unwrap()
        };
        assert_eq!(bias(&model.lstm1.input_transform), vec![0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
        assert!(model.lstm1.hidden_transform.bias.is_none());
        assert!(bias(&model.dense).iter().all(|&b| b == 0.0));
        assert_eq!(bias(&model.output), vec![0.0]);
    }

    #[test]
    fn test_default_architecture() {
        let cfg = YieldLstmConfig::new(12);
        assert_eq!((cfg.lstm1_units, cfg.lstm2_units, cfg.dense_units), (50, 30, 20));
        assert_eq!(cfg.dropout, 0.2);
    }

    #[test]
    fn test_loss_is_scalar() {
        let device = Default::default();
        let model: YieldLstm<TestBackend> = YieldLstmConfig::new(4).init(&device);
        let x = Tensor::<TestBackend, 3>::zeros([3, 1, 4], &device);
        let y = Tensor::<TestBackend, 2>::ones([3, 1], &device);
        let (loss, out) = model.forward_loss(x, y);
        assert_eq!(loss.dims(), [1]);
        assert_eq!(out.dims(), [3, 1]);
    }
}
