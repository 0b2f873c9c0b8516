use mixin_remap::config::{InterfaceConfig, RemapConfig};
use mixin_remap::constants::{FINAL, INJECT, OVERWRITE, SHADOW, UNIQUE};
use mixin_remap::mapping::ClassInfo;
use mixin_remap::model::{AnnotationNode, AnnotationValue, FieldNode, MemberRef, MethodNode};
use mixin_remap::testkit::{MixinBuilder, RemapEnv};
use mixin_remap::{assert_missing_feature, assert_structural, ConfiguredPolicy, LogAndContinue};
use pretty_assertions::assert_eq;

const T: &str = "com/example/T";
const M: &str = "com/example/mixin/TMixin";

fn env() -> RemapEnv {
    RemapEnv::new()
        .with_class(
            T,
            ClassInfo::new()
                .member("count", "I")
                .member("tick", "()V")
                .member("size", "()I"),
        )
        .with_class("com/example/api/Sized", ClassInfo::new().member("size", "()I"))
        .with_field_mapping(T, "count", "I", "cnt")
        .with_method_mapping(T, "tick", "()V", "a")
        .with_method_mapping(T, "size", "()I", "b")
}

#[test]
fn prefixed_shadow_field_keeps_its_prefix() {
    let env = env();
    let mut class = MixinBuilder::new(M)
        .target_type(T)
        .field(FieldNode::new("shadow$count", "I").with_annotation(AnnotationNode::new(SHADOW)))
        .build();

    env.remapper().remap_class(&mut class).unwrap();

    assert_eq!(
        env.renames(),
        vec![(MemberRef::new(M, "shadow$count", "I"), "shadow$cnt".to_owned())]
    );
}

#[test]
fn shadow_with_custom_prefix_and_final_modifier() {
    let env = env();
    let shadow = AnnotationNode::new(SHADOW).with("prefix", AnnotationValue::string("my$"));
    let mut class = MixinBuilder::new(M)
        .target_type(T)
        .field(
            FieldNode::new("my$count", "I")
                .with_annotation(shadow)
                .with_annotation(AnnotationNode::new(FINAL)),
        )
        .build();

    env.remapper().remap_class(&mut class).unwrap();

    assert_eq!(env.renamed_to("my$count"), Some("my$cnt".to_owned()));
}

#[test]
fn shadow_of_unmapped_member_pushes_nothing() {
    let env = RemapEnv::new().with_class(T, ClassInfo::new().member("stable", "()V"));
    let mut class = MixinBuilder::new(M)
        .target_type(T)
        .method(MethodNode::new("stable", "()V").with_annotation(AnnotationNode::new(SHADOW)))
        .build();

    env.remapper().remap_class(&mut class).unwrap();

    assert!(env.renames().is_empty());
}

#[test]
fn shadow_of_missing_member_is_a_gap() {
    let strict = env();
    let mut class = MixinBuilder::new(M)
        .target_type(T)
        .field(FieldNode::new("ghost", "J").with_annotation(AnnotationNode::new(SHADOW)))
        .build();

    let message = assert_missing_feature!(strict.remapper().remap_class(&mut class));
    assert!(message.contains("ghost"), "{}", message);

    let lenient = env().with_policy(LogAndContinue);
    lenient.remapper().remap_class(&mut class).unwrap();
    assert!(lenient.renames().is_empty());
}

#[test]
fn shadow_aliases_are_rewritten() {
    let env = env().with_policy(LogAndContinue);
    let shadow = AnnotationNode::new(SHADOW).with("aliases", AnnotationValue::strings(["count"]));
    let mut class = MixinBuilder::new(M)
        .target_type(T)
        .field(FieldNode::new("counter", "I").with_annotation(shadow))
        .build();

    env.remapper().remap_class(&mut class).unwrap();

    let aliases = class.fields[0].annotations[0].get("aliases").cloned();
    assert_eq!(aliases, Some(AnnotationValue::strings(["cnt"])));
}

#[test]
fn explicit_and_implicit_overwrites_rename_methods() {
    let env = env();
    let mut class = MixinBuilder::new(M)
        .target_type(T)
        .method(MethodNode::new("tick", "()V").with_annotation(AnnotationNode::new(OVERWRITE)))
        .method(MethodNode::new("size", "()I"))
        .build();

    env.remapper().remap_class(&mut class).unwrap();

    assert_eq!(
        env.renames(),
        vec![
            (MemberRef::new(M, "tick", "()V"), "a".to_owned()),
            (MemberRef::new(M, "size", "()I"), "b".to_owned()),
        ]
    );
}

#[test]
fn interface_members_keep_their_names() {
    let env = env();
    let mut class = MixinBuilder::new(M)
        .target_type(T)
        .implements("com/example/api/Sized")
        .method(MethodNode::new("size", "()I"))
        .build();

    let message = assert_structural!(env.remapper().remap_class(&mut class));
    assert!(message.contains("com/example/api/Sized"), "{}", message);
    assert!(env.renames().is_empty());
}

#[test]
fn allowed_interfaces_may_be_renamed() {
    let mut config = RemapConfig::default();
    config.interfaces = InterfaceConfig {
        forbid_member_renames: true,
        allow: vec!["com/example/api/Sized".to_owned()],
    };
    let env = env().with_policy(ConfiguredPolicy::from_config(&config));
    let mut class = MixinBuilder::new(M)
        .target_type(T)
        .implements("com/example/api/Sized")
        .method(MethodNode::new("size", "()I"))
        .build();

    env.remapper().remap_class(&mut class).unwrap();

    assert_eq!(env.renamed_to("size"), Some("b".to_owned()));
}

#[test]
fn unique_members_never_reach_collaborators() {
    let env = env();
    let unique = AnnotationNode::new(UNIQUE).with("silent", AnnotationValue::Bool(true));
    let mut class = MixinBuilder::new(M)
        .target_type(T)
        .method(MethodNode::new("tick", "()V").with_annotation(unique.clone()))
        .field(FieldNode::new("count", "I").with_annotation(unique))
        .build();
    let before = class.clone();

    env.remapper().remap_class(&mut class).unwrap();

    assert_eq!(env.lister.calls(), 0);
    assert!(env.renames().is_empty());
    assert_eq!(class, before);
}

#[test]
fn two_main_annotations_always_fail() {
    for (first, second) in [(SHADOW, OVERWRITE), (UNIQUE, SHADOW), (OVERWRITE, INJECT)] {
        let env = env().with_policy(LogAndContinue);
        let mut class = MixinBuilder::new(M)
            .target_type(T)
            .method(
                MethodNode::new("tick", "()V")
                    .with_annotation(AnnotationNode::new(first))
                    .with_annotation(AnnotationNode::new(second)),
            )
            .build();

        let message = assert_structural!(env.remapper().remap_class(&mut class));
        assert!(message.contains("incompatible"), "{}", message);
        assert!(env.renames().is_empty());
    }
}

#[test]
fn unknown_mixin_annotations_are_gaps() {
    let env = env();
    let mut class = MixinBuilder::new(M)
        .target_type(T)
        .method(
            MethodNode::new("invokeTick", "()V")
                .with_annotation(AnnotationNode::new("Lorg/spongepowered/asm/mixin/gen/Invoker;")),
        )
        .build();

    let message = assert_missing_feature!(env.remapper().remap_class(&mut class));
    assert!(message.contains("Invoker"), "{}", message);
}

#[test]
fn torn_shadow_across_targets_is_structural() {
    let env = env()
        .with_class("com/example/U", ClassInfo::new().member("count", "I"))
        .with_field_mapping("com/example/U", "count", "I", "other");
    let mut class = MixinBuilder::new(M)
        .target_type(T)
        .target_type("com/example/U")
        .field(FieldNode::new("count", "I").with_annotation(AnnotationNode::new(SHADOW)))
        .build();

    let message = assert_structural!(env.remapper().remap_class(&mut class));
    assert!(message.contains("cnt") && message.contains("other"), "{}", message);
    assert!(message.contains("@Accessor"), "{}", message);
}
