// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_notebook(cells: usize) -> String {
    let mut text = String::from("---\ntitle: Benchmark\n---\n");
    for i in 0..cells {
        match i % 3 {
            0 => text.push_str(&format!("# %% [markdown]\n# Section {i}\n\nSome prose.\n\n")),
            1 => text.push_str(
                "# %%--- [javascript]\n# properties:\n#   run_on_load: true\n# ---%%\nconst x = 5;\nx * 2;\n\n",
            ),
            _ => text.push_str("# %% [css]\nbody { margin: 0; }\n\n"),
        }
    }
    text
}

#[allow(dead_code)]
pub fn generate_legacy_notebook(cells: usize) -> String {
    let mut text = String::new();
    for i in 0..cells {
        if i % 2 == 0 {
            text.push_str(&format!("%% md\n# Section {i}\n"));
        } else {
            text.push_str("%% js autoRun\nconsole.log(1);\n");
        }
    }
    text
}
