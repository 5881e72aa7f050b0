//! 計測・評価用のユーティリティ群。
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::fmt::Write;

/// 合成レッスン（markdown）を生成する。
///
/// # Arguments
/// * `sections` - 生成する `##` / `###` セクション数
/// * `seed` - 乱数シード（同じシードなら同じ文書）
///
/// Sections alternate between explanatory prose, code-heavy material and
/// boilerplate headings so every scoring branch is exercised.
#[must_use]
pub fn synthetic_lesson(sections: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let topics = [
        "Ohm's Law",
        "Series Circuits",
        "Parallel Circuits",
        "Kirchhoff's Voltage Law",
        "Capacitors",
        "Inductors",
        "欧姆定律",
        "交流电路",
    ];
    let prose = [
        "Current is proportional to voltage because resistance limits the flow of charge.",
        "Therefore doubling the resistance halves the current for a fixed supply voltage.",
        "For example, a 10 ohm resistor across 5 volts carries half an ampere of current.",
        "A short circuit means the resistance approaches zero and the current spikes.",
        "电流与电压成正比，因为电阻限制了电荷的流动。",
        "例如，十欧姆的电阻接在五伏电源上时电流为零点五安培。",
    ];

    let mut doc =
        String::from("# Synthetic Lesson\n\nLead paragraph that is not part of any section.\n\n");
    for i in 0..sections {
        let level = if rng.random_bool(0.3) { "###" } else { "##" };
        let topic = topics[rng.random_range(0..topics.len())];
        match i % 5 {
            0 if i > 0 => {
                let _ = writeln!(doc, "{level} Summary {i}\n\nShort recap of part {i}.\n");
            }
            3 => {
                let _ = writeln!(
                    doc,
                    "{level} {topic} in code {i}\n\nRun it:\n\n```python\nprint({i})\n```\n\n\
                     ![circuit](circuit-{i}.png)\n"
                );
            }
            _ => {
                let _ = writeln!(doc, "{level} {topic} part {i}\n");
                let sentences = rng.random_range(2..=6);
                for _ in 0..sentences {
                    doc.push_str(prose[rng.random_range(0..prose.len())]);
                    doc.push(' ');
                }
                doc.push_str(
                    "\n\n#### Worked detail\n\n\
                     See the [reference sheet](sheet.pdf) for values.\n\n",
                );
            }
        }
    }
    doc
}
