//! Descriptors of the annotations and types the remapper understands.

/// Namespace of the core mixin annotations.
pub const MIXIN_NAMESPACE: &str = "Lorg/spongepowered/asm/mixin/";
/// Namespace of MixinExtras injector annotations.
pub const MIXINEXTRAS_NAMESPACE: &str = "Lcom/llamalad7/mixinextras/injector/";
/// Namespace of micromixin-specific annotations.
pub const MICROMIXIN_NAMESPACE: &str = "Lorg/stianloader/micromixin/annotations/";

pub const MIXIN: &str = "Lorg/spongepowered/asm/mixin/Mixin;";
pub const SHADOW: &str = "Lorg/spongepowered/asm/mixin/Shadow;";
pub const UNIQUE: &str = "Lorg/spongepowered/asm/mixin/Unique;";
pub const OVERWRITE: &str = "Lorg/spongepowered/asm/mixin/Overwrite;";
pub const FINAL: &str = "Lorg/spongepowered/asm/mixin/Final;";
pub const MUTABLE: &str = "Lorg/spongepowered/asm/mixin/Mutable;";
pub const INJECT: &str = "Lorg/spongepowered/asm/mixin/injection/Inject;";
pub const MODIFY_ARG: &str = "Lorg/spongepowered/asm/mixin/injection/ModifyArg;";
pub const REDIRECT: &str = "Lorg/spongepowered/asm/mixin/injection/Redirect;";
pub const MODIFY_RETURN_VALUE: &str = "Lcom/llamalad7/mixinextras/injector/ModifyReturnValue;";
pub const CANONICAL_OVERWRITE: &str =
    "Lorg/stianloader/micromixin/annotations/CanonicalOverwrite;";

pub const AT: &str = "Lorg/spongepowered/asm/mixin/injection/At;";
pub const SLICE: &str = "Lorg/spongepowered/asm/mixin/injection/Slice;";
pub const DESC: &str = "Lorg/spongepowered/asm/mixin/injection/Desc;";

pub const CALLBACK_INFO: &str = "org/spongepowered/asm/mixin/injection/callback/CallbackInfo";
pub const CALLBACK_INFO_RETURNABLE: &str =
    "org/spongepowered/asm/mixin/injection/callback/CallbackInfoReturnable";

/// Prefix stripped from `@Shadow` member names unless overridden.
pub const DEFAULT_SHADOW_PREFIX: &str = "shadow$";

/// Whether an annotation descriptor belongs to a namespace whose member
/// annotations the remapper must account for.
pub fn is_member_namespace(desc: &str) -> bool {
    desc.starts_with(MIXIN_NAMESPACE)
        || desc.starts_with(MIXINEXTRAS_NAMESPACE)
        || desc.starts_with(MICROMIXIN_NAMESPACE)
}
