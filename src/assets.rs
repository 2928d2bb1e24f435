//! Sprite selection and the asset readiness gate
//!
//! The shell loads images however it likes (browser `Image`, files, ...) and
//! reports each result here. A failed load is replaced by a 1x1 transparent
//! placeholder so nothing downstream ever depends on an image existing.
//! The session does not start ticking until every expected sprite has been
//! reported.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use crate::sim::AnimationState;

/// Why a sprite could not be loaded
#[derive(Debug, Clone, thiserror::Error)]
#[error("Failed to load sprite '{key}', reason='{reason}'")]
pub struct AssetLoadError {
    pub key: String,
    pub reason: String,
}

/// Decoded RGBA image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Sprite {
    /// 1x1 fully transparent pixel
    pub fn placeholder() -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: vec![0, 0, 0, 0],
        }
    }

    pub fn is_placeholder(&self) -> bool {
        *self == Self::placeholder()
    }
}

pub const ENEMY_SPRITE: &str = "enemy";
pub const BLOCK_SPRITE: &str = "block";
pub const BLOCK_USED_SPRITE: &str = "block_used";
pub const COIN_SPRITE: &str = "coin";
pub const FLAG_SPRITE: &str = "flag";
pub const PLATFORM_SPRITE: &str = "platform";

/// Sprite key for a character in a given animation state, e.g. `gigi_run`
pub fn player_sprite_key(character: &str, animation: AnimationState) -> String {
    format!("{}_{}", character.to_lowercase(), animation.as_str())
}

/// Every sprite a session with this character needs
pub fn manifest(character: &str) -> Vec<String> {
    let mut keys: Vec<String> = AnimationState::ALL
        .iter()
        .map(|&anim| player_sprite_key(character, anim))
        .collect();
    keys.extend(
        [
            ENEMY_SPRITE,
            BLOCK_SPRITE,
            BLOCK_USED_SPRITE,
            COIN_SPRITE,
            FLAG_SPRITE,
            PLATFORM_SPRITE,
        ]
        .iter()
        .map(|k| k.to_string()),
    );
    keys
}

#[derive(Debug, Default)]
struct GateInner {
    pending: HashSet<String>,
    sprites: HashMap<String, Rc<Sprite>>,
    wakers: Vec<Waker>,
}

/// Tracks outstanding sprite loads. Cheap to clone; clones share state.
#[derive(Debug, Clone, Default)]
pub struct AssetGate {
    inner: Rc<RefCell<GateInner>>,
}

impl AssetGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register sprites that must be reported before the gate opens
    pub fn register<I, S>(&self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut inner = self.inner.borrow_mut();
        for key in keys {
            let key = key.into();
            if !inner.sprites.contains_key(&key) {
                inner.pending.insert(key);
            }
        }
    }

    /// Report a finished load. Failures store the placeholder.
    pub fn complete(&self, key: &str, result: Result<Sprite, AssetLoadError>) {
        let sprite = match result {
            Ok(sprite) => sprite,
            Err(e) => {
                log::warn!("{e}; using placeholder");
                Sprite::placeholder()
            }
        };

        let wakers = {
            let mut inner = self.inner.borrow_mut();
            inner.pending.remove(key);
            inner.sprites.insert(key.to_string(), Rc::new(sprite));
            if inner.pending.is_empty() {
                std::mem::take(&mut inner.wakers)
            } else {
                Vec::new()
            }
        };
        if !wakers.is_empty() {
            log::info!("All sprites loaded");
        }
        for waker in wakers {
            waker.wake();
        }
    }

    pub fn is_ready(&self) -> bool {
        self.inner.borrow().pending.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Outstanding keys, sorted
    pub fn pending_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.inner.borrow().pending.iter().cloned().collect();
        keys.sort();
        keys
    }

    /// Look up a sprite; unknown keys get the placeholder
    pub fn sprite(&self, key: &str) -> Rc<Sprite> {
        self.inner
            .borrow()
            .sprites
            .get(key)
            .cloned()
            .unwrap_or_else(|| Rc::new(Sprite::placeholder()))
    }

    /// Future that resolves once nothing is pending
    pub fn when_ready(&self) -> WhenReady {
        WhenReady { gate: self.clone() }
    }
}

/// See [`AssetGate::when_ready`]
#[derive(Debug)]
pub struct WhenReady {
    gate: AssetGate,
}

impl Future for WhenReady {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let mut inner = self.gate.inner.borrow_mut();
        if inner.pending.is_empty() {
            Poll::Ready(())
        } else {
            let waker = cx.waker();
            if !inner.wakers.iter().any(|w| w.will_wake(waker)) {
                inner.wakers.push(waker.clone());
            }
            Poll::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::task::Wake;

    struct CountingWaker(AtomicUsize);

    impl Wake for CountingWaker {
        fn wake(self: Arc<Self>) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn red() -> Sprite {
        Sprite {
            width: 1,
            height: 1,
            rgba: vec![255, 0, 0, 255],
        }
    }

    #[test]
    fn test_empty_gate_is_ready() {
        assert!(AssetGate::new().is_ready());
    }

    #[test]
    fn test_gate_opens_after_all_reports() {
        let gate = AssetGate::new();
        gate.register(["a", "b"]);
        assert!(!gate.is_ready());
        assert_eq!(gate.pending_keys(), vec!["a".to_string(), "b".to_string()]);
        gate.complete("a", Ok(red()));
        assert_eq!(gate.pending(), 1);
        gate.complete(
            "b",
            Err(AssetLoadError {
                key: "b".into(),
                reason: "404".into(),
            }),
        );
        assert!(gate.is_ready());
        assert_eq!(*gate.sprite("a"), red());
        assert!(Rc::ptr_eq(&gate.sprite("a"), &gate.sprite("a")));
        assert!(gate.sprite("b").is_placeholder());
        assert!(gate.sprite("never-requested").is_placeholder());
    }

    #[test]
    fn test_when_ready_wakes_on_last_load() {
        let gate = AssetGate::new();
        gate.register(["a"]);

        let counter = Arc::new(CountingWaker(AtomicUsize::new(0)));
        let waker = Waker::from(counter.clone());
        let mut cx = Context::from_waker(&waker);
        let mut fut = gate.when_ready();

        assert!(Pin::new(&mut fut).poll(&mut cx).is_pending());
        assert!(Pin::new(&mut fut).poll(&mut cx).is_pending());
        assert_eq!(gate.inner.borrow().wakers.len(), 1);
        gate.complete("a", Ok(red()));
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
        assert!(Pin::new(&mut fut).poll(&mut cx).is_ready());
    }

    #[test]
    fn test_manifest_covers_every_animation() {
        let keys = manifest("Gigi");
        for anim in AnimationState::ALL {
            assert!(keys.contains(&player_sprite_key("Gigi", anim)));
        }
        assert!(keys.contains(&"gigi_dead".to_string()));
        assert!(keys.contains(&COIN_SPRITE.to_string()));
    }
}
