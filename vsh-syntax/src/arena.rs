// This file is part of vsh, a POSIX-style interactive shell.
// Copyright (C) 2026 the vsh authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Region allocator backing all per-command-line storage.
//!
//! An [`Arena`] is a linked chain of pages. Each allocation bumps an offset
//! inside the current page; when a page overflows, a fresh page (at least as
//! large as the request) is chained on. [`Arena::reset`] retains the first
//! page and frees the rest in one shot, which is how vsh discards the token
//! stream, syntax tree, and expansion results of the previous command line.
//!
//! The lifetime discipline replaces the pointer-validity rules of a manual
//! allocator: allocation methods take `&self` and return references that
//! borrow the arena, while `reset` takes `&mut self`. The borrow checker
//! therefore proves that no reference obtained from the arena survives a
//! reset.
//!
//! Allocation failure is failure of the global allocator and aborts the
//! process.

use std::alloc::{alloc, dealloc, handle_alloc_error, Layout};
use std::cell::RefCell;
use std::ptr::NonNull;

/// Minimum alignment of every allocation, in bytes.
pub const ARENA_ALIGNMENT: usize = 8;

/// Default usable size of a page, in bytes.
pub const ARENA_PAGE_SIZE: usize = 4096;

/// One contiguous page of arena storage.
struct Page {
    ptr: NonNull<u8>,
    capacity: usize,
    used: usize,
}

impl Page {
    fn new(capacity: usize) -> Self {
        let layout = page_layout(capacity);
        let raw = unsafe { alloc(layout) };
        let Some(ptr) = NonNull::new(raw) else {
            handle_alloc_error(layout)
        };
        Page {
            ptr,
            capacity,
            used: 0,
        }
    }
}

fn page_layout(capacity: usize) -> Layout {
    match Layout::from_size_align(capacity, ARENA_ALIGNMENT) {
        Ok(layout) => layout,
        Err(_) => panic!("arena page size out of range"),
    }
}

fn align_up(offset: usize, align: usize) -> usize {
    (offset + align - 1) & !(align - 1)
}

/// Region allocator with O(1) bulk reset.
///
/// See the [module documentation](self) for the allocation and lifetime
/// contract.
pub struct Arena {
    /// Pages in allocation order; the first page is never freed by `reset`
    /// and the last page is the one being bumped.
    pages: RefCell<Vec<Page>>,
    page_size: usize,
}

impl Arena {
    /// Creates an arena with the default page size.
    #[must_use]
    pub fn new() -> Self {
        Self::with_page_size(ARENA_PAGE_SIZE)
    }

    /// Creates an arena whose pages hold at least `page_size` bytes.
    #[must_use]
    pub fn with_page_size(page_size: usize) -> Self {
        let page_size = page_size.max(ARENA_ALIGNMENT);
        Arena {
            pages: RefCell::new(vec![Page::new(page_size)]),
            page_size,
        }
    }

    /// Allocates `size` bytes aligned to `align` (at least
    /// [`ARENA_ALIGNMENT`]) and returns the raw storage.
    fn alloc_raw(&self, size: usize, align: usize) -> NonNull<u8> {
        let align = align.max(ARENA_ALIGNMENT);
        let mut pages = self.pages.borrow_mut();

        let page = pages.last_mut().unwrap_or_else(|| unreachable!());
        let offset = align_up(page.used, align);
        if offset + size <= page.capacity {
            page.used = offset + size;
            // The page never moves or shrinks before the next reset, so the
            // returned pointer stays valid for the lifetime of `&self`.
            return unsafe { NonNull::new_unchecked(page.ptr.as_ptr().add(offset)) };
        }

        let capacity = align_up(size.max(self.page_size), ARENA_ALIGNMENT);
        let mut page = Page::new(capacity);
        page.used = size;
        let ptr = page.ptr;
        pages.push(page);
        ptr
    }

    /// Moves `value` into the arena and returns a reference to it.
    ///
    /// Only `Copy` types may be stored: the arena never runs destructors.
    pub fn alloc<T: Copy>(&self, value: T) -> &T {
        let ptr = self
            .alloc_raw(std::mem::size_of::<T>(), std::mem::align_of::<T>())
            .cast::<T>();
        unsafe {
            ptr.as_ptr().write(value);
            ptr.as_ref()
        }
    }

    /// Copies a slice into the arena.
    pub fn alloc_slice<T: Copy>(&self, values: &[T]) -> &[T] {
        if values.is_empty() {
            return &[];
        }
        let ptr = self
            .alloc_raw(std::mem::size_of_val(values), std::mem::align_of::<T>())
            .cast::<T>();
        unsafe {
            std::ptr::copy_nonoverlapping(values.as_ptr(), ptr.as_ptr(), values.len());
            std::slice::from_raw_parts(ptr.as_ptr(), values.len())
        }
    }

    /// Copies a string into the arena.
    pub fn alloc_str(&self, s: &str) -> &str {
        let bytes = self.alloc_slice(s.as_bytes());
        unsafe { std::str::from_utf8_unchecked(bytes) }
    }

    /// Discards everything allocated from this arena.
    ///
    /// The first page is retained for reuse; all other pages are freed.
    /// Taking `&mut self` guarantees no reference into the arena survives.
    pub fn reset(&mut self) {
        let pages = self.pages.get_mut();
        for page in pages.drain(1..) {
            free_page(page);
        }
        pages[0].used = 0;
    }

    /// Total number of bytes currently allocated, including alignment
    /// padding. Zero after a [`reset`](Self::reset).
    #[must_use]
    pub fn bytes_used(&self) -> usize {
        self.pages.borrow().iter().map(|page| page.used).sum()
    }
}

impl Default for Arena {
    fn default() -> Self {
        Arena::new()
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        for page in self.pages.get_mut().drain(..) {
            free_page(page);
        }
    }
}

impl std::fmt::Debug for Arena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arena")
            .field("pages", &self.pages.borrow().len())
            .field("bytes_used", &self.bytes_used())
            .finish()
    }
}

fn free_page(page: Page) {
    unsafe { dealloc(page.ptr.as_ptr(), page_layout(page.capacity)) }
}
