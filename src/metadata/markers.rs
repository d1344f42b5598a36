//! Custom-attribute derived marker tags.
//!
//! The engine never parses custom-attribute blobs itself; the host adapter
//! answers a fixed set of "does this entity carry attribute X" questions at
//! load time and records the answers as [`MarkerFlags`]. Only attributes
//! that change what the stripper emits are represented.

use bitflags::bitflags;

bitflags! {
    /// Attribute-derived tags on a type or member view.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MarkerFlags: u32 {
        /// `CompilerGeneratedAttribute` - synthesized scaffolding, excluded
        /// from the reconstructed API surface.
        const COMPILER_GENERATED = 0x0001;
        /// `SerializableAttribute` on a type - re-emitted as
        /// `[System.Serializable]`.
        const SERIALIZABLE = 0x0002;
        /// `NonSerializedAttribute` on a field - re-emitted as
        /// `[System.NonSerialized]`.
        const NON_SERIALIZED = 0x0004;
        /// `UnityEngine.HideInInspector` - field is force-hidden from
        /// inspector tooling.
        const FORCE_HIDDEN = 0x0008;
        /// `UnityEngine.SerializeField` - field stays visible to inspector
        /// tooling despite being non-public.
        const KEEP_VISIBLE = 0x0010;
        /// `ExtensionAttribute` - first parameter is the receiver.
        const EXTENSION = 0x0020;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_compose() {
        let m = MarkerFlags::SERIALIZABLE | MarkerFlags::NON_SERIALIZED;
        assert!(m.contains(MarkerFlags::SERIALIZABLE));
        assert!(!m.contains(MarkerFlags::COMPILER_GENERATED));
        assert_eq!(MarkerFlags::default(), MarkerFlags::empty());
    }
}
