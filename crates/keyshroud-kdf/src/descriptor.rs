// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Fixed-layout parameter records and the list that owns them.
//!
//! The records never own or zero what they point at: the originating buffers
//! (typically [`SecureBuffer`](keyshroud_buffer::SecureBuffer)s) stay responsible for that.

use core::marker::PhantomData;

use crate::error::KdfError;
use crate::kind::KdfBufferKind;

/// Version field of every [`KdfParameterListDesc`].
pub const KDF_PARAMETER_LIST_VERSION: u32 = 0;

/// One parameter record: `(byte_length: u32, kind: u32, data: *const u8)`.
///
/// `#[repr(C)]`, sequential fields, natural alignment only. The record borrows its
/// region for `'a`, so `byte_length` always matches the region it points at.
#[derive(Clone, Copy)]
#[repr(C)]
pub struct KdfParameter<'a> {
    byte_length: u32,
    kind: KdfBufferKind,
    data: *const u8,
    _region: PhantomData<&'a [u8]>,
}

impl<'a> KdfParameter<'a> {
    /// Describes `region` as a parameter of type `kind`.
    ///
    /// # Errors
    ///
    /// [`KdfError::InvalidLength`] if `region` is longer than `u32::MAX` bytes.
    pub fn new(kind: KdfBufferKind, region: &'a [u8]) -> Result<Self, KdfError> {
        let byte_length =
            u32::try_from(region.len()).map_err(|_| KdfError::InvalidLength(region.len()))?;

        Ok(Self {
            byte_length,
            kind,
            data: region.as_ptr(),
            _region: PhantomData,
        })
    }

    /// Returns the parameter type.
    pub fn kind(&self) -> KdfBufferKind {
        self.kind
    }

    /// Returns the length of the referenced region in bytes.
    pub fn byte_length(&self) -> u32 {
        self.byte_length
    }

    /// Returns the raw pointer handed to the native call.
    pub fn as_ptr(&self) -> *const u8 {
        self.data
    }

    /// Returns the referenced region.
    pub fn as_bytes(&self) -> &'a [u8] {
        // SAFETY: `data` and `byte_length` come from a `&'a [u8]` in `new`, and the
        // PhantomData keeps that borrow alive for `'a`.
        unsafe { core::slice::from_raw_parts(self.data, self.byte_length as usize) }
    }
}

impl core::fmt::Debug for KdfParameter<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KdfParameter")
            .field("kind", &self.kind)
            .field("byte_length", &self.byte_length)
            .finish_non_exhaustive()
    }
}

/// Ordered list of [`KdfParameter`]s.
///
/// Insertion order is preserved exactly; the native KDF consumes entries in that order.
/// The list holds raw pointers and is neither `Send` nor `Sync`: build it right
/// before the call and drop it right after.
#[derive(Debug, Default)]
pub struct KdfParameterList<'a> {
    params: Vec<KdfParameter<'a>>,
}

impl<'a> KdfParameterList<'a> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Appends a parameter.
    pub fn push(
        &mut self,
        kind: KdfBufferKind,
        region: &'a [u8],
    ) -> Result<&mut Self, KdfError> {
        if self.params.len() >= u32::MAX as usize {
            return Err(KdfError::TooManyParameters);
        }

        self.params.push(KdfParameter::new(kind, region)?);

        Ok(self)
    }

    /// Builder-style [`push`](Self::push).
    pub fn with(mut self, kind: KdfBufferKind, region: &'a [u8]) -> Result<Self, KdfError> {
        self.push(kind, region)?;

        Ok(self)
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns true if the list has no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns the parameters in insertion order.
    pub fn as_slice(&self) -> &[KdfParameter<'a>] {
        &self.params
    }

    /// Iterates the parameters in insertion order.
    pub fn iter(&self) -> core::slice::Iter<'_, KdfParameter<'a>> {
        self.params.iter()
    }

    /// Returns the list header handed to the native call.
    pub fn desc(&self) -> KdfParameterListDesc<'_> {
        KdfParameterListDesc {
            version: KDF_PARAMETER_LIST_VERSION,
            // push() caps the length below u32::MAX
            count: self.params.len() as u32,
            buffers: self.params.as_ptr(),
            _list: PhantomData,
        }
    }
}

impl<'l, 'a> IntoIterator for &'l KdfParameterList<'a> {
    type Item = &'l KdfParameter<'a>;
    type IntoIter = core::slice::Iter<'l, KdfParameter<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Builds a [`KdfParameterList`] from `(kind, region)` pairs, preserving order.
///
/// # Errors
///
/// [`KdfError::InvalidLength`] if a region is longer than `u32::MAX` bytes.
pub fn build_descriptor_list<'a, I>(entries: I) -> Result<KdfParameterList<'a>, KdfError>
where
    I: IntoIterator<Item = (KdfBufferKind, &'a [u8])>,
{
    let mut list = KdfParameterList::new();

    for (kind, region) in entries {
        list.push(kind, region)?;
    }

    Ok(list)
}

/// List header: `(version: u32, count: u32, buffers: *const KdfParameter)`.
///
/// Borrows the list it was created from, which in turn borrows every region.
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct KdfParameterListDesc<'l> {
    version: u32,
    count: u32,
    buffers: *const KdfParameter<'l>,
    _list: PhantomData<&'l [KdfParameter<'l>]>,
}

impl<'l> KdfParameterListDesc<'l> {
    /// Returns the layout version.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Returns the number of records.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Returns the pointer to the first record.
    pub fn as_ptr(&self) -> *const KdfParameter<'l> {
        self.buffers
    }

    /// Returns the records.
    pub fn parameters(&self) -> &'l [KdfParameter<'l>] {
        // SAFETY: `buffers`/`count` describe the Vec of the list borrowed for `'l`
        // (see KdfParameterList::desc); an empty Vec yields a dangling, aligned pointer.
        unsafe { core::slice::from_raw_parts(self.buffers, self.count as usize) }
    }
}
