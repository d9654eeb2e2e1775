//! Plain text rendering of circuits, one wire per qubit.

use std::collections::HashMap;

use super::circuit::Circuit;

const WIRE: char = '─';
const CONNECTOR: char = '│';
const GAP: usize = 3;

impl Circuit {
    /// Draws the circuit with one row per qubit and one column per moment.
    ///
    /// ```text
    /// 0: ───[X]────────[Z]^0.125─────────
    ///
    /// 1: ───[Y]^0.25───[Y]^-0.5────[Z]───
    /// ```
    ///
    /// Multi-qubit operations repeat their label on every wire and draw a
    /// vertical connector across the rows in between.
    pub fn to_text_diagram(&self) -> String {
        let qubits = self.all_qubits();
        if qubits.is_empty() {
            return String::new();
        }
        let row_of: HashMap<_, _> = qubits
            .iter()
            .enumerate()
            .map(|(row, q)| (*q, row))
            .collect();

        let prefixes: Vec<String> = qubits.iter().map(|q| format!("{q}: ")).collect();
        let prefix_width = prefixes
            .iter()
            .map(|p| p.chars().count())
            .max()
            .unwrap_or(0);

        let mut wires: Vec<String> = prefixes
            .iter()
            .map(|p| format!("{p:<prefix_width$}"))
            .collect();
        let mut spacers: Vec<String> = vec![" ".repeat(prefix_width); qubits.len() - 1];

        for moment in self.moments() {
            let mut labels: Vec<Option<String>> = vec![None; qubits.len()];
            let mut spans: Vec<bool> = vec![false; spacers.len()];
            for op in moment.operations() {
                let label = op.gate.to_string();
                let rows: Vec<usize> = op
                    .qubits
                    .iter()
                    .filter_map(|q| row_of.get(q).copied())
                    .collect();
                for &row in &rows {
                    labels[row] = Some(label.clone());
                }
                if let (Some(&low), Some(&high)) = (rows.iter().min(), rows.iter().max()) {
                    spans[low..high].iter_mut().for_each(|gap| *gap = true);
                }
            }
            let width = labels
                .iter()
                .flatten()
                .map(|label| label.chars().count())
                .max()
                .unwrap_or(1);

            for (wire, label) in wires.iter_mut().zip(&labels) {
                wire.extend(std::iter::repeat(WIRE).take(GAP));
                let label = label.as_deref().unwrap_or("");
                wire.push_str(label);
                wire.extend(std::iter::repeat(WIRE).take(width - label.chars().count()));
            }
            for (spacer, spanned) in spacers.iter_mut().zip(&spans) {
                spacer.push_str(&" ".repeat(GAP));
                if *spanned {
                    spacer.push(CONNECTOR);
                    spacer.push_str(&" ".repeat(width.saturating_sub(1)));
                } else {
                    spacer.push_str(&" ".repeat(width));
                }
            }
        }

        let mut lines = Vec::with_capacity(wires.len() * 2);
        for (row, wire) in wires.iter_mut().enumerate() {
            wire.extend(std::iter::repeat(WIRE).take(GAP));
            lines.push(wire.trim_end().to_string());
            if let Some(spacer) = spacers.get(row) {
                lines.push(spacer.trim_end().to_string());
            }
        }
        lines.join("\n")
    }
}
