//! Live hotbar table: lookup surface over the two in-memory tables.
//!
//! ## Example
//!
//! ```ignore
//! use hotbar::{FrameTicker, HotbarTable, HotbarType};
//!
//! let ticker = FrameTicker::new();
//! let table = HotbarTable::new(&process, &ticker);
//!
//! // Each frame, the host ticks and the cache is dropped
//! ticker.tick();
//!
//! if let Some(slot) = table.get_raw(0, 3)? {
//!     println!("{} [{}]", slot.name(), slot.keybind());
//! }
//! ```
//!
//! ## Threading
//!
//! The table is single-threaded: lookups and the frame-tick callback must run
//! on the same thread as the host's frame loop. `HotbarTable` is neither
//! `Send` nor `Sync`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, trace};

use crate::error::Result;
use crate::framework::{FrameTickSource, TickHandle};
use crate::hotbar::{
    HotbarType, RawDisplayRecord, RawRecastRecord, SlotCache, SlotCoordinate, SlotRecord, SlotView,
};
use crate::memory::{ReadMemory, SignatureScanner};
use crate::offset::{ResolvedAddresses, TableSignatures, resolve_table_addresses};

/// Configuration for a [`HotbarTable`]
#[derive(Debug, Clone, Default)]
pub struct HotbarTableConfig {
    pub signatures: TableSignatures,
}

impl HotbarTableConfig {
    pub fn builder() -> HotbarTableConfigBuilder {
        HotbarTableConfigBuilder::default()
    }
}

/// Builder for HotbarTableConfig
#[derive(Debug, Clone, Default)]
pub struct HotbarTableConfigBuilder {
    signatures: Option<TableSignatures>,
}

impl HotbarTableConfigBuilder {
    /// Use signatures other than the builtin set
    pub fn signatures(mut self, signatures: TableSignatures) -> Self {
        self.signatures = Some(signatures);
        self
    }

    pub fn build(self) -> HotbarTableConfig {
        HotbarTableConfig {
            signatures: self.signatures.unwrap_or_default(),
        }
    }
}

/// Address resolution progress; attempted at most once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressState {
    Unresolved,
    Resolved(ResolvedAddresses),
    /// The single attempt failed; slots stay absent for this table's lifetime
    PermanentlyUnresolved,
}

/// Hotbar slots with recast state, cached per frame
pub struct HotbarTable<R, T>
where
    R: ReadMemory + SignatureScanner,
    T: FrameTickSource,
{
    reader: R,
    ticks: T,
    config: HotbarTableConfig,
    addresses: Cell<AddressState>,
    cache: Rc<RefCell<SlotCache>>,
    subscription: Cell<Option<TickHandle>>,
}

impl<R, T> HotbarTable<R, T>
where
    R: ReadMemory + SignatureScanner,
    T: FrameTickSource,
{
    /// Create a table with the builtin signatures and subscribe to frame ticks
    pub fn new(reader: R, ticks: T) -> Self {
        Self::with_config(reader, ticks, HotbarTableConfig::default())
    }

    pub fn with_config(reader: R, ticks: T, config: HotbarTableConfig) -> Self {
        let cache = Rc::new(RefCell::new(SlotCache::new()));

        let weak = Rc::downgrade(&cache);
        let handle = ticks.subscribe(Box::new(move || {
            if let Some(cache) = weak.upgrade() {
                cache.borrow_mut().clear();
            }
        }));

        Self {
            reader,
            ticks,
            config,
            addresses: Cell::new(AddressState::Unresolved),
            cache,
            subscription: Cell::new(Some(handle)),
        }
    }

    pub fn config(&self) -> &HotbarTableConfig {
        &self.config
    }

    pub fn address_state(&self) -> AddressState {
        self.addresses.get()
    }

    /// Resolved table addresses, if resolution has run and succeeded
    pub fn addresses(&self) -> Option<ResolvedAddresses> {
        match self.addresses.get() {
            AddressState::Resolved(addresses) => Some(addresses),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.addresses().is_some()
    }

    /// Number of slots currently cached
    pub fn cached_len(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Resolve both table addresses on first use.
    ///
    /// The pointer chains only become valid once the player is logged in.
    /// A failed attempt is not retried: create the table after login.
    fn ensure_addresses(&self) -> Result<Option<ResolvedAddresses>> {
        match self.addresses.get() {
            AddressState::Resolved(addresses) => return Ok(Some(addresses)),
            AddressState::PermanentlyUnresolved => return Ok(None),
            AddressState::Unresolved => {}
        }

        self.addresses.set(AddressState::PermanentlyUnresolved);
        let resolved = resolve_table_addresses(&self.reader, &self.config.signatures)?;
        if let Some(addresses) = resolved {
            debug!(
                "Hotbar table at 0x{:X}, recast table at 0x{:X}",
                addresses.hotbar, addresses.recast
            );
            self.addresses.set(AddressState::Resolved(addresses));
        }
        Ok(resolved)
    }

    /// Slot at `coord`, or `None` while the tables are unavailable
    pub fn get(&self, coord: SlotCoordinate) -> Result<Option<Rc<SlotView>>> {
        let Some(addresses) = self.ensure_addresses()? else {
            return Ok(None);
        };

        if let Some(view) = self.cache.borrow().get(&coord) {
            return Ok(Some(view));
        }

        let display = RawDisplayRecord::read_at(&self.reader, addresses.hotbar, coord)?;
        let recast = RawRecastRecord::read_at(&self.reader, addresses.recast, coord)?;
        trace!("Filled {}", coord);

        let view = SlotView::new(&display, &recast);
        Ok(Some(self.cache.borrow_mut().insert_if_absent(coord, view)))
    }

    /// Slot by raw bar and slot numbers; unknown numbers give `None`
    pub fn get_raw(&self, bar: u8, slot: u8) -> Result<Option<Rc<SlotView>>> {
        match SlotCoordinate::from_raw(bar, slot) {
            Some(coord) => self.get(coord),
            None => Ok(None),
        }
    }

    /// All 16 slots of `bar` in slot order
    pub fn bar(&self, bar: HotbarType) -> Result<Vec<Option<Rc<SlotView>>>> {
        SlotCoordinate::in_bar(bar)
            .map(|coord| self.get(coord))
            .collect()
    }

    /// All 16 slots of a raw bar number; `None` if it names no bar
    pub fn bar_raw(&self, bar: u8) -> Result<Option<Vec<Option<Rc<SlotView>>>>> {
        HotbarType::from_u8(bar).map(|bar| self.bar(bar)).transpose()
    }

    /// Every slot, bars outer and slots inner, each fetched through [`get`](Self::get)
    pub fn iter(
        &self,
    ) -> impl Iterator<Item = Result<(SlotCoordinate, Option<Rc<SlotView>>)>> + '_ {
        SlotCoordinate::all().map(move |coord| self.get(coord).map(|view| (coord, view)))
    }

    /// Decode both tables in one pass and cache every slot not already cached
    pub fn preload_all(&self) -> Result<()> {
        let Some(addresses) = self.ensure_addresses()? else {
            return Ok(());
        };

        let displays = RawDisplayRecord::read_table(&self.reader, addresses.hotbar)?;
        let recasts = RawRecastRecord::read_table(&self.reader, addresses.recast)?;

        let mut cache = self.cache.borrow_mut();
        for coord in SlotCoordinate::all() {
            if cache.contains(&coord) {
                continue;
            }
            let bar = coord.bar().index();
            let slot = coord.slot() as usize;
            cache.insert_if_absent(coord, SlotView::new(&displays[bar][slot], &recasts[bar][slot]));
        }
        debug!("Preloaded hotbar cache ({} slots)", cache.len());
        Ok(())
    }

    /// Stop listening for frame ticks and drop cached slots.
    ///
    /// Resolved addresses are kept. Calling this more than once is a no-op.
    pub fn close(&self) {
        if let Some(handle) = self.subscription.take() {
            self.cache.borrow_mut().clear();
            self.ticks.unsubscribe(handle);
            trace!("Hotbar table closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.subscription.get().is_none()
    }
}

impl<R, T> Drop for HotbarTable<R, T>
where
    R: ReadMemory + SignatureScanner,
    T: FrameTickSource,
{
    fn drop(&mut self) {
        self.close();
    }
}
