use std::sync::mpsc;

use rand::rngs::StdRng;

use ferrite_perceptron::data::toy::{self, Line};
use ferrite_perceptron::{
    accuracy, EpochStats, Mlp, Perceptron, SignActivation, TrainConfig, WeightInit,
};

use crate::config::DemoConfig;
use crate::report::{crossing, learning_curve, section, solve_for_y, verdict};

/// Everything a scenario may draw on. The generator is seeded once in `main`.
pub struct Context {
    pub config: DemoConfig,
    pub rng: StdRng,
}

pub struct Scenario {
    pub name: &'static str,
    pub description: &'static str,
    pub run: fn(&mut Context) -> anyhow::Result<()>,
}

pub const SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "model_x_gt_9",
        description: "A single dimensional input to a single perceptron, \
                      trained on the dataset of x > 9",
        run: model_x_gt_9,
    },
    Scenario {
        name: "model_linear",
        description: "A two dimensional input perceptron, trained to model y = x/2 + 5",
        run: model_linear,
    },
    Scenario {
        name: "model_AND",
        description: "A two dimensional input perceptron, trained to operate as an AND gate",
        run: model_and,
    },
    Scenario {
        name: "model_XOR",
        description: "A multi-layer perceptron, modelling the XOR function",
        run: model_xor,
    },
];

pub fn find(name: &str) -> Option<&'static Scenario> {
    SCENARIOS.iter().find(|s| s.name == name)
}

const LEARNING_RULE: &str =
    "Perceptron Learning Rule\n\t\
     (weight = weight + (learning_rate)(error := correct - predicted)(input))";

/// Training config whose per-epoch stats can be collected once training returns.
fn progress(learning_rate: f64) -> (TrainConfig, mpsc::Receiver<EpochStats>) {
    let (tx, rx) = mpsc::channel();
    (TrainConfig::new(learning_rate).with_progress(tx), rx)
}

fn print_plane_2d(p: &Perceptron) {
    let (w, b) = (p.weights(), p.bias_weight());
    println!("Final weight vector w in R2 (w_0, w_1) = ({:.2}, {:.2})", w[0], w[1]);
    println!("Final bias value b = {b:.2}");
    println!("This defines an equation: {:.2}x + {:.2}y + {b:.2} = 0", w[0], w[1]);
    match solve_for_y(w[0], w[1], b) {
        Some((slope, intercept)) => println!("Re-arranged for y: y = {slope:.2}x + {intercept:.2}"),
        None => println!(
            "The y weight is zero, so the boundary is a vertical line and cannot be solved for y."
        ),
    }
}

fn model_x_gt_9(ctx: &mut Context) -> anyhow::Result<()> {
    let epochs = ctx.config.epochs_or(1000);
    let ds = toy::integer_threshold(0..20, 9)?;

    section("DETAILS");
    println!("Model: model_x_gt_9");
    println!("Aim: Train a neuron to fire when input vector x_1 > 9");
    println!("Architecture: Single Perceptron");
    println!("Input: A one dimensional input vector, x\n\t- x_1: Input value");
    println!("Activation: Sign Activation Function");
    println!("Loss Function: {LEARNING_RULE}");
    println!("Training Strategy:");
    println!("\t{epochs} epochs of correctly labeled integers 0 -> 19 inclusive.");

    section("TRAINING");
    println!("Training {epochs} epochs now.");
    let mut p = Perceptron::new(1, SignActivation, epochs)?;
    let (config, rx) = progress(ctx.config.learning_rate);
    p.train_with(&ds, &config)?;
    learning_curve(&rx.try_iter().collect::<Vec<_>>());
    println!("Training complete.");

    section("TRAINING RESULTS");
    let (w, b) = (p.weights()[0], p.bias_weight());
    println!("Final weight vector w in R2 (w_0, w_1) = ({w:.6}, {b:.6})");
    println!("Vector w is a normal vector to the hyperplane: {w:.2}x + {b:.2}y = 0");
    match crossing(w, b) {
        Some(x) => {
            println!("The hyperplane crosses y = 1 at x = {x:.2}");
            println!(
                "\t(every input sits at (x, 1): the bias lifts the one dimensional input into R2)"
            );
            println!("The perceptron will only fire for values that are >= {x:.2}");
        }
        None => println!("The input weight is zero, so the firing threshold is undefined."),
    }

    section("PREDICTION");
    println!("Starting prediction test from x = -15 to 14");
    for (i, x) in (-15..=14).enumerate() {
        let prediction = p.feedforward(&[x as f64])?;
        let expected = if x > 9 { 1.0 } else { -1.0 };
        println!(
            "{}: Input: {x:3} Expected: {expected:2.0} Prediction: {prediction:2.0}",
            verdict(i + 1, 30, prediction == expected)
        );
    }
    Ok(())
}

fn model_linear(ctx: &mut Context) -> anyhow::Result<()> {
    let epochs = ctx.config.epochs_or(100);
    let count = ctx.config.linear_samples;
    let bound = ctx.config.point_bound;
    let line = Line::new(0.5, 5.0);

    section("DETAILS");
    println!("Model: model_linear");
    println!(
        "Aim: Train a neuron to linearly separate input vector x in R2 \
         against equation: y = x/2 + 5"
    );
    println!("Architecture: Single Perceptron");
    println!("Input: A two dimensional input vector, x");
    println!("\t- x_1: Input value, mapped conceptually to the x axis");
    println!("\t- x_2: Input value, mapped conceptually to the y axis");
    println!("Activation: Sign Activation Function");
    println!("Loss Function: {LEARNING_RULE}");
    println!("Training Strategy:");
    println!("\t{count} random integer points with {} <= x, y <= {bound}", -bound);
    println!("\tPerceptron trained with {epochs} epochs of the dataset.");

    section("GENERATE TRAINING DATA");
    let ds = line.random_points(count, -bound, bound, &mut ctx.rng)?;
    for (i, (row, label)) in ds.iter().enumerate() {
        println!(
            "Generated Random Point ({}/{count}): (x,y): ({}, {}). Point is {} the line.",
            i + 1,
            row[0],
            row[1],
            if label == 1.0 { "above" } else { "below" }
        );
    }

    section("TRAINING");
    println!("Training {epochs} epochs now.");
    let mut p = Perceptron::new(2, SignActivation, epochs)?;
    let (config, rx) = progress(ctx.config.learning_rate);
    p.train_with(&ds, &config)?;
    learning_curve(&rx.try_iter().collect::<Vec<_>>());

    section("TRAINING RESULTS");
    print_plane_2d(&p);

    section("PREDICTION");
    let total = ctx.config.prediction_samples;
    for i in 1..=total {
        let (x, y) = Line::random_point(-bound, bound, &mut ctx.rng);
        let expected = line.label(x, y);
        let prediction = p.feedforward(&[x, y])?;
        println!(
            "{}: Input: ({x:3},{y:3}) Expected: {expected:2} \
             (Point is {} the line) Prediction: {prediction:2.0}",
            verdict(i, total, prediction == expected),
            if expected == 1.0 { "above" } else { "below" }
        );
    }
    Ok(())
}

fn model_and(ctx: &mut Context) -> anyhow::Result<()> {
    let epochs = ctx.config.epochs_or(100);
    let ds = toy::and_gate()?;

    section("DETAILS");
    println!("Model: model_AND");
    println!("Aim: Train a neuron to model an AND gate, acting against an input vector x in R2");
    println!("Architecture: Single Perceptron");
    println!("Input: A two dimensional input vector, x");
    println!("Activation: Sign Activation Function");
    println!("Loss Function: {LEARNING_RULE}");
    println!("Training Strategy:");
    println!("\tPerceptron trained with {epochs} epochs of the entire truth table of an AND gate.");

    section("TRAINING");
    println!("Training {epochs} epochs now.");
    let mut p = Perceptron::new(ds.feature_width(), SignActivation, epochs)?;
    let (config, rx) = progress(ctx.config.learning_rate);
    p.train_with(&ds, &config)?;
    learning_curve(&rx.try_iter().collect::<Vec<_>>());

    section("TRAINING RESULTS");
    print_plane_2d(&p);

    section("PREDICTION");
    let total = ds.sample_count();
    for (i, (row, label)) in ds.iter().enumerate() {
        let prediction = p.feedforward(row)?;
        println!(
            "{}: Input: ({:2}, {:2}) Expected: {label:2} Prediction: {prediction:2}",
            verdict(i + 1, total, prediction == label),
            row[0],
            row[1]
        );
    }
    Ok(())
}

fn model_xor(ctx: &mut Context) -> anyhow::Result<()> {
    let epochs = ctx.config.epochs_or(1000);
    let hidden = ctx.config.hidden_units;
    let ds = toy::xor_gate()?;

    section("DETAILS");
    println!("Model: model_XOR");
    println!(
        "Aim: Train a two layer network to model an XOR gate, \
         which no single perceptron can separate"
    );
    println!("Architecture: 2 inputs -> {hidden} hidden units -> 1 output");
    println!("Activation: Sign Activation Function (tanh slope used when backpropagating)");
    println!(
        "Loss Function: Backpropagated error, (weight += (learning_rate)(local error)(input))"
    );
    println!("Training Strategy:");
    println!("\t{epochs} epochs of the entire truth table of an XOR gate.");

    section("TRAINING");
    println!("Training {epochs} epochs now.");
    let init = WeightInit::Uniform { scale: ctx.config.init_scale };
    let mut mlp = Mlp::new(2, hidden, 1, epochs, SignActivation, init, &mut ctx.rng)?;
    let (config, rx) = progress(ctx.config.learning_rate);
    mlp.train_with(&ds, &config)?;
    learning_curve(&rx.try_iter().collect::<Vec<_>>());

    section("TRAINING RESULTS");
    println!("Training set accuracy: {:.0}%", accuracy(&mlp, &ds)? * 100.0);
    let hidden_layer = mlp.hidden_layer();
    let hidden_units = hidden_layer.weights().iter_rows().zip(hidden_layer.biases());
    for (k, (weights, bias)) in hidden_units.enumerate() {
        println!("Hidden unit {k}: weights {weights:?}, bias {bias:.2}");
    }
    let output_layer = mlp.output_layer();
    for (weights, bias) in output_layer.weights().iter_rows().zip(output_layer.biases()) {
        println!("Output unit: weights {weights:?}, bias {bias:.2}");
    }

    section("PREDICTION");
    let total = ds.sample_count();
    for (i, (row, label)) in ds.iter().enumerate() {
        let prediction = mlp.feedforward(row)?[0];
        println!(
            "{}: Input: ({:2}, {:2}) Expected: {label:2} Prediction: {prediction:2}",
            verdict(i + 1, total, prediction == label),
            row[0],
            row[1]
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_names_are_unique_and_findable() {
        for s in SCENARIOS {
            assert_eq!(find(s.name).map(|f| f.name), Some(s.name));
        }
        assert!(find("model_or").is_none());
    }
}
