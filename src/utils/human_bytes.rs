/// Tailles mémoire lisibles (pool de particules, buffers d'instances).
pub trait HumanBytes {
    fn human_bytes(&self) -> String;
}

const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

fn format_bytes(size: f64) -> String {
    let mut scaled = size.abs();
    let mut unit = None;
    for u in UNITS {
        if scaled < 1024.0 {
            break;
        }
        scaled /= 1024.0;
        unit = Some(u);
    }
    match unit {
        Some(u) => format!("{:.2} {}", scaled.copysign(size), u),
        None => format!("{} B", size),
    }
}

macro_rules! impl_human_bytes {
    ($($t:ty),*) => {
        $(
            impl HumanBytes for $t {
                fn human_bytes(&self) -> String {
                    format_bytes(*self as f64)
                }
            }
        )*
    };
}

impl_human_bytes!(usize, u64, u32);
