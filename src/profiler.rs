use log::info;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::time::{Duration, Instant};

/// Valeur de métrique typée
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Usize(usize),
    F32(f32),
    Duration(Duration),
}

impl From<usize> for MetricValue {
    fn from(v: usize) -> Self {
        MetricValue::Usize(v)
    }
}
impl From<f32> for MetricValue {
    fn from(v: f32) -> Self {
        MetricValue::F32(v)
    }
}
impl From<Duration> for MetricValue {
    fn from(v: Duration) -> Self {
        MetricValue::Duration(v)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Usize(u) => write!(f, "{}", u),
            MetricValue::F32(v) => write!(f, "{:.2}", v),
            MetricValue::Duration(d) => write!(f, "{:.2?}", d),
        }
    }
}

impl MetricValue {
    fn as_f64(&self) -> f64 {
        match self {
            MetricValue::Usize(u) => *u as f64,
            MetricValue::F32(v) => *v as f64,
            MetricValue::Duration(d) => d.as_secs_f64(),
        }
    }

    fn same_kind(&self, x: f64) -> MetricValue {
        match self {
            MetricValue::Usize(_) => MetricValue::Usize(x.round() as usize),
            MetricValue::F32(_) => MetricValue::F32(x as f32),
            MetricValue::Duration(_) => MetricValue::Duration(Duration::from_secs_f64(x.max(0.0))),
        }
    }
}

/// (moyenne, min, max)
pub type Summary<T> = (T, T, T);

#[derive(Debug, Default)]
struct ProfilerInner {
    /// Durées des blocs mesurés, en millisecondes
    samples: HashMap<String, VecDeque<f32>>,
    metrics: HashMap<String, VecDeque<MetricValue>>,
    frame_times: VecDeque<f32>,
}

/// Profiler mono-thread à fenêtre glissante.
///
/// Chaque série garde au plus `max_samples` valeurs ; les plus anciennes sont
/// évincées en premier.
#[derive(Debug)]
pub struct Profiler {
    inner: RefCell<ProfilerInner>,
    max_samples: usize,
}

fn push_bounded<T>(buffer: &mut VecDeque<T>, value: T, max_samples: usize) {
    if buffer.len() >= max_samples {
        buffer.pop_front();
    }
    buffer.push_back(value);
}

impl Profiler {
    pub fn new(max_samples: usize) -> Self {
        Self {
            inner: RefCell::new(ProfilerInner::default()),
            max_samples: max_samples.max(1),
        }
    }

    /// Mesure globale d'une frame (RAII)
    pub fn frame(&self) -> FrameGuard<'_> {
        FrameGuard {
            profiler: self,
            start: Instant::now(),
        }
    }

    /// Profile un bloc de code et retourne sa valeur de retour
    pub fn profile_block<T, F>(&self, label: &str, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        let start = Instant::now();
        let result = f();
        self.record_sample(label, start.elapsed());
        result
    }

    fn record_sample(&self, label: &str, elapsed: Duration) {
        let ms = elapsed.as_secs_f32() * 1000.0;
        let mut inner = self.inner.borrow_mut();
        let buffer = inner.samples.entry(label.to_string()).or_default();
        push_bounded(buffer, ms, self.max_samples);
    }

    /// Enregistre une métrique scalaire typée
    pub fn record_metric<T: Into<MetricValue>>(&self, label: &str, value: T) {
        let mut inner = self.inner.borrow_mut();
        let buffer = inner.metrics.entry(label.to_string()).or_default();
        push_bounded(buffer, value.into(), self.max_samples);
    }

    /// Frames par seconde (temps mur) sur la fenêtre courante
    pub fn fps(&self) -> f32 {
        let inner = self.inner.borrow();
        if inner.frame_times.is_empty() {
            return 0.0;
        }
        let avg = inner.frame_times.iter().sum::<f32>() / inner.frame_times.len() as f32;
        if avg > 0.0 {
            1000.0 / avg
        } else {
            f32::INFINITY
        }
    }

    /// Résumé des temps mesurés, en ms
    pub fn summary(&self) -> HashMap<String, Summary<f32>> {
        let inner = self.inner.borrow();
        inner
            .samples
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.clone(), summarize_series(v)))
            .collect()
    }

    pub fn metric_summary(&self, label: &str) -> Option<Summary<MetricValue>> {
        let inner = self.inner.borrow();
        inner.metrics.get(label).and_then(summarize_metric)
    }

    pub fn metrics_summary(&self) -> HashMap<String, Summary<MetricValue>> {
        let inner = self.inner.borrow();
        inner
            .metrics
            .iter()
            .filter_map(|(k, v)| summarize_metric(v).map(|s| (k.clone(), s)))
            .collect()
    }

    /// Log toutes les métriques avec un target spécifique
    pub fn log_metrics_for_target(&self, target: &str, show_fps: bool) {
        if show_fps {
            info!(target: target, "{:.2} FPS", self.fps());
        }
        let mut timings: Vec<_> = self.summary().into_iter().collect();
        timings.sort_by(|a, b| a.0.cmp(&b.0));
        for (label, (avg, min, max)) in timings {
            info!(
                target: target,
                "{}: avg = {:.3} ms | min = {:.3} ms | max = {:.3} ms",
                label, avg, min, max
            );
        }
        let mut metrics: Vec<_> = self.metrics_summary().into_iter().collect();
        metrics.sort_by(|a, b| a.0.cmp(&b.0));
        for (label, (avg, min, max)) in metrics {
            info!(target: target, "{label}: avg={avg}, min={min}, max={max}");
        }
    }
}

fn summarize_series(series: &VecDeque<f32>) -> Summary<f32> {
    let avg = series.iter().sum::<f32>() / series.len() as f32;
    let min = series.iter().copied().fold(f32::MAX, f32::min);
    let max = series.iter().copied().fold(f32::MIN, f32::max);
    (avg, min, max)
}

/// `None` pour une série vide. Les valeurs d'une série sont supposées du même type.
fn summarize_metric(series: &VecDeque<MetricValue>) -> Option<Summary<MetricValue>> {
    let first = *series.front()?;
    let (mut sum, mut min, mut max) = (0.0, f64::MAX, f64::MIN);
    for v in series {
        let x = v.as_f64();
        sum += x;
        min = min.min(x);
        max = max.max(x);
    }
    let avg = sum / series.len() as f64;
    Some((first.same_kind(avg), first.same_kind(min), first.same_kind(max)))
}

/// Mesure globale d'une frame
pub struct FrameGuard<'a> {
    profiler: &'a Profiler,
    start: Instant,
}

impl Drop for FrameGuard<'_> {
    fn drop(&mut self) {
        let ms = self.start.elapsed().as_secs_f32() * 1000.0;
        let mut inner = self.profiler.inner.borrow_mut();
        push_bounded(&mut inner.frame_times, ms, self.profiler.max_samples);
    }
}

/// Macro helper : déduit automatiquement le target via le module appelant
#[macro_export]
macro_rules! log_metrics {
    ($profiler:expr) => {
        $profiler.log_metrics_for_target(module_path!(), false);
    };
}

#[macro_export]
macro_rules! log_metrics_and_fps {
    ($profiler:expr) => {
        $profiler.log_metrics_for_target(module_path!(), true);
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_window_is_bounded() {
        let profiler = Profiler::new(3);
        for v in [1usize, 2, 3, 10] {
            profiler.record_metric("particles.live", v);
        }

        let (avg, min, max) = profiler.metric_summary("particles.live").unwrap();
        // 1 a été évincé
        assert_eq!(min, MetricValue::Usize(2));
        assert_eq!(max, MetricValue::Usize(10));
        assert_eq!(avg, MetricValue::Usize(5));
    }

    #[test]
    fn test_profile_block_returns_value_and_records() {
        let profiler = Profiler::new(10);
        let v = profiler.profile_block("work", || 41 + 1);
        assert_eq!(v, 42);

        let summary = profiler.summary();
        let (avg, min, max) = summary["work"];
        assert!(min <= avg && avg <= max);
    }

    #[test]
    fn test_frame_guard_feeds_fps() {
        let profiler = Profiler::new(10);
        assert_eq!(profiler.fps(), 0.0);
        {
            let _frame = profiler.frame();
            std::thread::sleep(Duration::from_millis(2));
        }
        let fps = profiler.fps();
        assert!(fps > 0.0 && fps < 1000.0, "{fps}");
    }

    #[test]
    fn test_unknown_metric_is_none() {
        let profiler = Profiler::new(4);
        assert!(profiler.metric_summary("nope").is_none());
        profiler.record_metric("ratio", 0.5f32);
        assert_eq!(
            profiler.metric_summary("ratio"),
            Some((MetricValue::F32(0.5), MetricValue::F32(0.5), MetricValue::F32(0.5)))
        );
        profiler.log_metrics_for_target("test", true);
    }
}
