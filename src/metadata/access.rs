//! Access flag sets for classes, fields and methods.
//!
//! Each declaration level carries a 16-bit access flag word; the valid bits differ
//! between classes, fields and methods, so they are modeled as three separate
//! [`bitflags`] types. Unknown bits are preserved by `from_bits_retain`, matching the
//! decoder's general policy of never discarding input it does not understand.

use bitflags::bitflags;

bitflags! {
    /// Access flags of a class or interface declaration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClassAccessFlags: u16 {
        /// Declared public; accessible from outside its package.
        const PUBLIC = 0x0001;
        /// Declared final; no subclasses allowed.
        const FINAL = 0x0010;
        /// Treat superclass methods specially on `invokespecial`.
        const SUPER = 0x0020;
        /// Is an interface, not a class.
        const INTERFACE = 0x0200;
        /// Declared abstract; must not be instantiated.
        const ABSTRACT = 0x0400;
        /// Not present in the source code; generated by the compiler.
        const SYNTHETIC = 0x1000;
        /// Declared as an annotation interface.
        const ANNOTATION = 0x2000;
        /// Declared as an enum class.
        const ENUM = 0x4000;
    }
}

bitflags! {
    /// Access flags of a field declaration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FieldAccessFlags: u16 {
        /// Declared public; accessible from outside its package.
        const PUBLIC = 0x0001;
        /// Declared private; accessible only within the defining class.
        const PRIVATE = 0x0002;
        /// Declared protected; accessible within subclasses.
        const PROTECTED = 0x0004;
        /// Declared static.
        const STATIC = 0x0008;
        /// Declared final; never directly assigned after construction.
        const FINAL = 0x0010;
        /// Declared volatile; cannot be cached.
        const VOLATILE = 0x0040;
        /// Declared transient; not written by default serialization.
        const TRANSIENT = 0x0080;
        /// Not present in the source code; generated by the compiler.
        const SYNTHETIC = 0x1000;
        /// Declared as an element of an enum class.
        const ENUM = 0x4000;
    }
}

bitflags! {
    /// Access flags of a method declaration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MethodAccessFlags: u16 {
        /// Declared public; accessible from outside its package.
        const PUBLIC = 0x0001;
        /// Declared private; accessible only within the defining class.
        const PRIVATE = 0x0002;
        /// Declared protected; accessible within subclasses.
        const PROTECTED = 0x0004;
        /// Declared static.
        const STATIC = 0x0008;
        /// Declared final; must not be overridden.
        const FINAL = 0x0010;
        /// Declared synchronized; invocation wraps a monitor.
        const SYNCHRONIZED = 0x0020;
        /// A bridge method generated by the compiler.
        const BRIDGE = 0x0040;
        /// Declared with a variable number of arguments.
        const VARARGS = 0x0080;
        /// Declared native; implemented outside the JVM.
        const NATIVE = 0x0100;
        /// Declared abstract; no implementation provided.
        const ABSTRACT = 0x0400;
        /// Declared strictfp; floating-point mode is FP-strict.
        const STRICT = 0x0800;
        /// Not present in the source code; generated by the compiler.
        const SYNTHETIC = 0x1000;
    }
}
