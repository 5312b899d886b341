use instant::Instant;

pub fn elapsed_seconds(since: Instant) -> f64 {
    let dt = since.elapsed();
    (dt.as_secs() as f64) + (f64::from(dt.subsec_nanos()) * 1e-9)
}

pub fn prettyprint_usize(x: usize) -> String {
    let num = format!("{}", x);
    let mut result = String::new();
    let mut i = num.len();
    for c in num.chars() {
        result.push(c);
        i -= 1;
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
    }
    result
}

fn prettyprint_time(seconds: f64) -> String {
    format!("{:.4}s", seconds)
}

struct Progress {
    label: String,
    processed_items: usize,
    total_items: usize,
    started_at: Instant,
}

struct TimerSpan {
    name: String,
    started_at: Instant,
}

enum StackEntry {
    TimerSpan(TimerSpan),
    Progress(Progress),
}

/// Hierarchical timing of a batch job. Every finished span or iteration is logged, and `done`
/// logs the full list once more.
pub struct Timer {
    outermost_name: String,
    results: Vec<String>,
    stack: Vec<StackEntry>,
}

impl Timer {
    pub fn new(name: &str) -> Timer {
        let mut t = Timer {
            outermost_name: name.to_string(),
            results: Vec::new(),
            stack: Vec::new(),
        };
        t.start(name);
        t
    }

    /// For tests and callers that don't care about the output.
    pub fn throwaway() -> Timer {
        Timer::new("throwaway")
    }

    pub fn start(&mut self, name: &str) {
        debug!("{}...", name);
        self.stack.push(StackEntry::TimerSpan(TimerSpan {
            name: name.to_string(),
            started_at: Instant::now(),
        }));
    }

    pub fn stop(&mut self, name: &str) {
        let span = match self.stack.pop() {
            Some(StackEntry::TimerSpan(s)) => s,
            Some(StackEntry::Progress(p)) => {
                panic!("stop({}) while iterating over {}", name, p.label)
            }
            None => panic!("stop({}) with an empty stack", name),
        };
        assert_eq!(span.name, name);
        let line = format!(
            "{}{}... {}",
            "  ".repeat(self.stack.len()),
            name,
            prettyprint_time(elapsed_seconds(span.started_at))
        );
        info!("{}", line);
        self.results.push(line);
    }

    pub fn start_iter(&mut self, label: &str, total_items: usize) {
        if total_items == 0 {
            return;
        }
        self.stack.push(StackEntry::Progress(Progress {
            label: label.to_string(),
            processed_items: 0,
            total_items,
            started_at: Instant::now(),
        }));
    }

    pub fn next(&mut self) {
        let done = match self.stack.last_mut() {
            Some(StackEntry::Progress(p)) => {
                p.processed_items += 1;
                if p.processed_items > p.total_items {
                    panic!(
                        "{} is too few items for {} progress",
                        prettyprint_usize(p.total_items),
                        p.label
                    );
                }
                p.processed_items == p.total_items
            }
            _ => panic!("Can't next() while a TimerSpan is top of the stack"),
        };
        if done {
            if let Some(StackEntry::Progress(p)) = self.stack.pop() {
                let line = format!(
                    "{}{} ({})... {}",
                    "  ".repeat(self.stack.len()),
                    p.label,
                    prettyprint_usize(p.total_items),
                    prettyprint_time(elapsed_seconds(p.started_at))
                );
                info!("{}", line);
                self.results.push(line);
            }
        }
    }

    pub fn done(mut self) {
        let name = self.outermost_name.clone();
        self.stop(&name);
        assert!(self.stack.is_empty());
        info!("");
        for line in &self.results {
            info!("{}", line);
        }
        info!("");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commas() {
        assert_eq!(prettyprint_usize(0), "0");
        assert_eq!(prettyprint_usize(999), "999");
        assert_eq!(prettyprint_usize(1000), "1,000");
        assert_eq!(prettyprint_usize(1234567), "1,234,567");
    }

    #[test]
    fn nested_spans_and_iters() {
        let mut timer = Timer::new("outer");
        timer.start("inner");
        timer.start_iter("items", 3);
        timer.next();
        timer.next();
        timer.next();
        // Zero items pushes nothing
        timer.start_iter("nothing", 0);
        timer.stop("inner");
        assert_eq!(timer.results.len(), 2);
        timer.done();
    }
}
