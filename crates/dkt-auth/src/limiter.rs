use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    /// Time until the current window closes.
    pub reset: Duration,
}

/// Injected rate limiter. Implementations may be in-process or backed by a
/// shared store for multi-instance deployments.
pub trait Limiter: Send + Sync {
    fn check(&self, key: &str) -> Decision;
}

/// Limiter that never denies.
pub struct Unlimited;

impl Limiter for Unlimited {
    fn check(&self, _: &str) -> Decision {
        Decision {
            allowed: true,
            limit: u32::MAX,
            remaining: u32::MAX,
            reset: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    count: u32,
    reset: Instant,
}

/// Fixed-window counters keyed by client, for single-instance deployments.
///
/// Approximate by construction: counts are per process and windows are
/// not sliding. Expired entries are dropped by [`Window::sweep`].
pub struct Window {
    max: u32,
    span: Duration,
    table: Mutex<HashMap<String, Entry>>,
}

impl Window {
    pub fn new(max: u32, span: Duration) -> Self {
        Self {
            max,
            span,
            table: Mutex::new(HashMap::new()),
        }
    }
    /// Strict preset for authentication endpoints: 5 per 15 minutes.
    pub fn auth() -> Self {
        Self::new(5, Duration::from_secs(15 * 60))
    }
    pub fn check_at(&self, key: &str, now: Instant) -> Decision {
        let mut table = self.table.lock().unwrap_or_else(|e| e.into_inner());
        let entry = table
            .entry(key.to_string())
            .and_modify(|e| match e.reset <= now {
                true => *e = Entry { count: 1, reset: now + self.span },
                false => e.count = e.count.saturating_add(1),
            })
            .or_insert(Entry {
                count: 1,
                reset: now + self.span,
            });
        Decision {
            allowed: entry.count <= self.max,
            limit: self.max,
            remaining: self.max.saturating_sub(entry.count),
            reset: entry.reset.saturating_duration_since(now),
        }
    }
    /// Drops closed windows. Returns how many entries were removed.
    pub fn sweep(&self) -> usize {
        self.sweep_at(Instant::now())
    }
    pub fn sweep_at(&self, now: Instant) -> usize {
        let mut table = self.table.lock().unwrap_or_else(|e| e.into_inner());
        let before = table.len();
        table.retain(|_, e| e.reset > now);
        before - table.len()
    }
    pub fn len(&self) -> usize {
        self.table.lock().map(|t| t.len()).unwrap_or(0)
    }
}

impl Limiter for Window {
    fn check(&self, key: &str) -> Decision {
        self.check_at(key, Instant::now())
    }
}

/// Rate-limit key for a request: first forwarded hop, then the real-ip
/// header, then the peer address.
pub fn client_key(req: &actix_web::HttpRequest) -> String {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    };
    header("x-forwarded-for")
        .and_then(|f| f.split(',').next().map(|s| s.trim().to_string()))
        .filter(|s| !s.is_empty())
        .or_else(|| header("x-real-ip"))
        .or_else(|| req.peer_addr().map(|a| a.ip().to_string()))
        .map(|ip| format!("ip:{}", ip))
        .unwrap_or_else(|| "ip:unknown".to_string())
}
