use std::collections::BTreeMap;

use indexmap::IndexMap;

use super::{is_text_address, parse_address, parse_word_hex, Snapshot};

/// Register state the registers pane binds to. Snapshots may omit
/// registers holding zero, so values carry over between steps instead of
/// being rebuilt from scratch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegisterFile {
    pub gpr: [u32; 32],
    pub pc: u32,
    pub hi: u32,
    pub lo: u32,
}

impl RegisterFile {
    fn fold(&mut self, regs: &BTreeMap<String, i64>) {
        for (name, &value) in regs {
            let value = value as u32;
            match name.as_str() {
                "pc" => self.pc = value,
                "hi" => self.hi = value,
                "lo" => self.lo = value,
                _ => {
                    let number = name.strip_prefix('$').and_then(|n| n.parse::<usize>().ok());
                    match number {
                        Some(n) if n < 32 => self.gpr[n] = value,
                        _ => tracing::warn!(%name, "ignoring unknown register"),
                    }
                }
            }
        }
    }
}

/// One word of the text segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionRow {
    pub address: u32,
    pub word: u32,
    /// Disassembled form, filled in lazily as steps reveal it. Sticky:
    /// once assigned it survives later steps that mention other encodings.
    pub assembly: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Advanced,
    EndOfTrace,
}

/// The loaded trace plus everything the panes display, accumulated by
/// folding snapshots in order. The cursor only moves forward.
#[derive(Debug, Default)]
pub struct Session {
    steps: Vec<Snapshot>,
    cursor: usize,
    registers: RegisterFile,
    instructions: BTreeMap<u32, InstructionRow>,
    data: IndexMap<u32, u32>,
    transcript: String,
    highlight: u32,
}

impl Session {
    pub fn new(steps: Vec<Snapshot>) -> Self {
        let mut session = Session {
            steps,
            ..Default::default()
        };
        if let Some(first) = session.steps.first().cloned() {
            session.fold(&first);
            session.highlight = session.registers.pc;
        }
        session
    }

    /// Move to the next snapshot and fold it into the view state.
    pub fn advance(&mut self) -> StepOutcome {
        if self.cursor + 1 >= self.steps.len() {
            tracing::debug!(step = self.cursor, "advance past end of trace");
            return StepOutcome::EndOfTrace;
        }

        // The instruction executed by this step sits at the pre-step pc.
        self.highlight = self.registers.pc;

        self.cursor += 1;
        let snapshot = self.steps[self.cursor].clone();
        self.fold(&snapshot);

        tracing::debug!(
            step = self.cursor,
            pc = %super::word_hex(self.registers.pc),
            executed = %snapshot.text,
            "advanced"
        );
        StepOutcome::Advanced
    }

    fn fold(&mut self, snapshot: &Snapshot) {
        for (key, &value) in &snapshot.mem {
            let Some(address) = parse_address(key) else {
                tracing::warn!(%key, "ignoring unparseable memory address");
                continue;
            };
            let word = value as u32;

            if is_text_address(address) {
                self.instructions
                    .entry(address)
                    .and_modify(|row| row.word = word)
                    .or_insert_with(|| InstructionRow {
                        address,
                        word,
                        assembly: String::new(),
                    });
            } else {
                self.data.insert(address, word);
            }
        }

        self.registers.fold(&snapshot.regs);

        if !snapshot.hex.is_empty() {
            self.associate(&snapshot.hex, &snapshot.text);
        }

        self.transcript.push_str(&snapshot.stdout);
    }

    /// Attach a disassembled string to the first instruction sharing the
    /// executed encoding. A hex matching no row associates nothing.
    fn associate(&mut self, hex: &str, assembly: &str) {
        let Some(word) = parse_word_hex(hex) else {
            tracing::warn!(hex, "ignoring unparseable instruction encoding");
            return;
        };

        if let Some(row) = self.instructions.values_mut().find(|row| row.word == word) {
            row.assembly = assembly.to_string();
        }
    }

    /// Zero-based index of the current snapshot.
    pub fn step(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether the cursor sits on the last snapshot.
    pub fn at_end(&self) -> bool {
        self.cursor + 1 >= self.steps.len()
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    /// Text segment rows in address order.
    pub fn instructions(&self) -> impl Iterator<Item = &InstructionRow> {
        self.instructions.values()
    }

    pub fn instruction_count(&self) -> usize {
        self.instructions.len()
    }

    /// Data rows in the order they were first seen.
    pub fn data(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.data.iter().map(|(&address, &word)| (address, word))
    }

    /// Address of the most recently executed instruction.
    pub fn highlight(&self) -> u32 {
        self.highlight
    }

    /// Program output accumulated over all steps seen so far.
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Disassembled form of the instruction the current step executed.
    /// Empty for the initial snapshot.
    pub fn executed_text(&self) -> &str {
        self.steps
            .get(self.cursor)
            .map(|s| s.text.as_str())
            .unwrap_or("")
    }

    /// Hex encoding of the instruction the current step executed.
    pub fn executed_hex(&self) -> &str {
        self.steps
            .get(self.cursor)
            .map(|s| s.hex.as_str())
            .unwrap_or("")
    }
}
