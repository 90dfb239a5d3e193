mod common;

use blocksmith::definition::{BlockDefinition, ClassRef, Description};
use blocksmith::error::Error;
use blocksmith::workspace::{StripPrefixes, Workspace};
use common::{blog_module, workspace, yaml, MemoryReader};
use serde_yaml::Value;
use std::path::{Path, PathBuf};

const TEXT_TEMPLATE: &str = "/proj/config/block/templates/text.yaml";

const TITLE_FROM_TEMPLATE: &str = r"
article:
  properties:
    title:
      template: text
      options:
        label: Title
";

const IMAGE_TEMPLATE: &str = r"
type: media
type_options:
  use: App\Entity\Image
form:
  use:
    - App\Form\MediaType
";

const GALLERY: &str = r"
gallery:
  use: [App\Entity\Image]
  form:
    use: [App\Form\GalleryForm]
  properties:
    image:
      template: image
    cover:
      template: image
      type_options:
        use: [App\Entity\Image, App\Entity\Cover]
";

const SLIDER: &str = r"
slider:
  properties:
    slides: {type: list}
  classes:
    slider/slide:
      properties:
        image: {type: media}
    slider/caption: {}
";

const SLIDER_WITH_MISSING_TEMPLATE: &str = r"
slider:
  classes:
    slide:
      properties:
        image: {template: image}
";

const QUOTE: &str = r"
Quote:
  namespace: AcmeBlogBundle
  label: Citation
  implements: Acme\BlogBundle\Model\BlockInterface
  traits: [Acme\BlogBundle\Model\BlockTrait]
  groups: [content, layout]
  block_type: true
  properties:
    text: {type: text, orm_type: string, nullable: true}
    author: {type: text}
";

fn description(source: &str) -> Description {
    source.parse().unwrap()
}

fn resolve<'w>(workspace: &'w Workspace, source: &str) -> BlockDefinition<'w> {
    BlockDefinition::new(workspace, description(source)).unwrap()
}

#[test_log::test]
fn test_standalone_article() {
    let workspace = workspace(MemoryReader::default());
    let definition = resolve(
        &workspace,
        "article:\n  properties:\n    title:\n      type: text\n",
    );

    assert!(!definition.is_module_bound());
    assert_eq!(definition.name(), "article");
    assert!(definition.sub_directories().is_empty());
    assert_eq!(definition.namespace(), "App");
    assert_eq!(definition.path(), "App");
    assert_eq!(definition.snake_name(), "article");
    assert_eq!(definition.camel_name(), "Article");
    assert_eq!(definition.label(), "Article");
    assert_eq!(definition.application_name(), "app");
    assert_eq!(definition.translation_domain(), None);

    assert_eq!(
        definition.entity_file_path(),
        PathBuf::from("/proj/src/Entity/Article.php")
    );
    assert_eq!(definition.entity_namespace(), r"App\Entity");
    assert_eq!(definition.form_namespace(), r"App\Form\Type");
    assert_eq!(definition.form_type_name(), "ArticleType");
    assert_eq!(
        definition.form_type_file_path(),
        PathBuf::from("/proj/src/Form/Type/ArticleType.php")
    );
    assert_eq!(
        definition.doctrine_orm_file_path(),
        PathBuf::from("/proj/config/doctrine/Article.orm.yml")
    );
    assert_eq!(
        definition.template_file_name(),
        "theme/block/article.html.twig"
    );
    assert_eq!(
        definition.template_file_path(),
        PathBuf::from("/proj/templates/theme/block/article.html.twig")
    );
    assert_eq!(definition.properties().len(), 1);
    assert_eq!(definition.properties()["title"].type_name(), Some("text"));
}

#[test]
fn test_sub_directories() {
    let workspace = workspace(MemoryReader::default());
    let definition = resolve(&workspace, "gallery_block/item:\n  properties: {}\n");
    let orm_file = definition.doctrine_orm_file_path();

    assert_eq!(definition.name(), "item");
    assert_eq!(definition.sub_directories(), ["gallery_block".to_string()]);
    assert_eq!(
        orm_file.file_name().and_then(|name| name.to_str()),
        Some("gallery_block.Item.orm.yml")
    );
    assert_eq!(
        definition.entity_file_path(),
        PathBuf::from("/proj/src/Entity/gallery_block/Item.php")
    );
    assert_eq!(
        definition.form_type_file_path(),
        PathBuf::from("/proj/src/Form/Type/gallery_block/ItemType.php")
    );
    assert_eq!(definition.entity_namespace(), r"App\Entity\gallery_block");
    assert_eq!(definition.form_namespace(), r"App\Form\Type\gallery_block");
}

#[test]
fn test_block_suffix_is_dropped_from_derived_names() {
    let workspace = workspace(MemoryReader::default());
    let definition = resolve(&workspace, "GalleryBlock: {}\n");

    assert_eq!(definition.snake_name(), "gallery");
    assert_eq!(definition.kebab_name(), "gallery-block");
    assert_eq!(definition.camel_name(), "GalleryBlock");
    assert_eq!(
        definition.template_file_name(),
        "theme/block/gallery.html.twig"
    );
    assert_eq!(
        definition.type_file_path(),
        PathBuf::from("/proj/src/Block/GalleryBlockType.php")
    );
    assert_eq!(
        definition.persistence_mapping().table_name,
        "app_gallery_block"
    );
}

#[test]
fn test_acronym_name_keeps_class_and_file_names_aligned() {
    let workspace = workspace(MemoryReader::default());
    let definition = resolve(&workspace, "HTMLBlock: {}\n");

    assert_eq!(definition.camel_name(), "HTMLBlock");
    assert_eq!(definition.class_ref().name, "HTMLBlock");
    assert_eq!(
        definition.entity_file_path(),
        PathBuf::from("/proj/src/Entity/HTMLBlock.php")
    );
    assert_eq!(definition.form_type_name(), "HTMLBlockType");
    assert_eq!(
        definition.form_type_file_path(),
        PathBuf::from("/proj/src/Form/Type/HTMLBlockType.php")
    );
    assert_eq!(
        definition.type_file_path(),
        PathBuf::from("/proj/src/Block/HTMLBlockType.php")
    );
    assert_eq!(
        definition.doctrine_orm_file_path(),
        PathBuf::from("/proj/config/doctrine/HTMLBlock.orm.yml")
    );
    assert_eq!(definition.snake_name(), "html");
    assert_eq!(
        definition.template_file_name(),
        "theme/block/html.html.twig"
    );
}

#[test_log::test]
fn test_module_bound_paths() {
    let workspace = workspace(MemoryReader::default());
    let definition = resolve(
        &workspace,
        "Quote:\n  namespace: AcmeBlogBundle\n  properties:\n    text: {type: text}\n",
    );
    let module = blog_module();

    assert!(definition.is_module_bound());
    assert_eq!(definition.module(), Some(&module));
    assert_eq!(definition.namespace(), r"Acme\BlogBundle");
    assert_eq!(definition.path(), "Acme/BlogBundle");
    assert_eq!(definition.entity_namespace(), r"Acme\BlogBundle\Entity");
    assert_eq!(definition.application_name(), "acme_blog");
    assert_eq!(definition.translation_domain(), Some("AcmeBlogBundle"));

    let paths = [
        definition.doctrine_orm_file_path(),
        definition.entity_file_path(),
        definition.form_type_file_path(),
        definition.template_file_path(),
        definition.type_file_path(),
    ];
    for path in &paths {
        assert!(
            path.starts_with(&module.path),
            "{} outside module",
            path.display()
        );
    }
    assert_eq!(
        paths[0],
        PathBuf::from("/proj/src/Acme/BlogBundle/Resources/config/doctrine/Quote.orm.yml")
    );
    assert_eq!(
        paths[1],
        PathBuf::from("/proj/src/Acme/BlogBundle/Entity/Quote.php")
    );
    assert_eq!(
        paths[2],
        PathBuf::from("/proj/src/Acme/BlogBundle/Form/Type/QuoteType.php")
    );
    assert_eq!(
        paths[3],
        PathBuf::from("/proj/src/Acme/BlogBundle/Resources/views/theme/block/quote.html.twig")
    );
    assert_eq!(
        paths[4],
        PathBuf::from("/proj/src/Acme/BlogBundle/Block/QuoteType.php")
    );
}

#[test]
fn test_standalone_paths_start_with_project() {
    let workspace = workspace(MemoryReader::default());
    let definition = resolve(&workspace, "sub/Quote:\n  namespace: Acme\\Blog\n");

    for path in [
        definition.doctrine_orm_file_path(),
        definition.entity_file_path(),
        definition.form_type_file_path(),
        definition.template_file_path(),
        definition.type_file_path(),
    ] {
        assert!(
            path.starts_with(Path::new("/proj")),
            "{} outside project",
            path.display()
        );
    }
    assert_eq!(definition.application_name(), "acme");
    assert_eq!(definition.entity_namespace(), r"Acme\Blog\Entity\sub");
}

#[test]
fn test_unregistered_module_namespace_stays_standalone() {
    let workspace = workspace(MemoryReader::default());
    let definition = resolve(&workspace, "Quote:\n  namespace: MissingBundle\n");

    assert!(!definition.is_module_bound());
    assert_eq!(definition.namespace(), "MissingBundle");
    assert_eq!(
        definition.entity_file_path(),
        PathBuf::from("/proj/src/Entity/Quote.php")
    );
}

#[test]
fn test_default_namespace_from_workspace() {
    let workspace = workspace(MemoryReader::default())
        .with_default_namespace("AcmeBlogBundle");
    let definition = resolve(&workspace, "Quote: {}\n");

    assert!(definition.is_module_bound());
}

#[test_log::test]
fn test_template_is_merged_under_property() {
    let reader = MemoryReader::default()
        .with(TEXT_TEMPLATE, "type: text\noptions:\n  required: true\n");
    let workspace = workspace(reader);
    let definition = resolve(&workspace, TITLE_FROM_TEMPLATE);

    let title = &definition.properties()["title"];
    assert_eq!(
        Value::Mapping(title.config.clone()),
        yaml("type: text\noptions:\n  required: true\n  label: Title\n")
    );
    assert!(title.get("template").is_none());
}

#[test]
fn test_missing_template_fails_construction() {
    let workspace = workspace(MemoryReader::default());
    let result = BlockDefinition::new(
        &workspace,
        description("article:\n  properties:\n    title:\n      template: missing-template\n"),
    );

    let err = result.unwrap_err();
    match &err {
        Error::TemplateNotFound { template } => assert_eq!(template, "missing-template"),
        other => panic!("Expected TemplateNotFound, got {other:?}"),
    }
    assert_eq!(err.to_string(), "Can't find template 'missing-template'.");
}

#[test]
fn test_non_string_template_is_rejected() {
    let workspace = workspace(MemoryReader::default());

    for template in ["5", "[text]", "{name: text}", "true"] {
        let source = format!("article:\n  properties:\n    title:\n      template: {template}\n");
        match BlockDefinition::new(&workspace, description(&source)) {
            Err(Error::InvalidDescription { reason }) => {
                assert!(reason.contains("template must be a string"), "{reason}")
            }
            other => panic!("Expected InvalidDescription for {template}, got {other:?}"),
        }
    }
}

#[test]
fn test_null_template_is_dropped_from_property() {
    let workspace = workspace(MemoryReader::default());
    let definition = resolve(
        &workspace,
        "article:\n  properties:\n    title:\n      template: ~\n      type: text\n",
    );

    let title = &definition.properties()["title"];
    assert!(title.get("template").is_none());
    assert_eq!(title.type_name(), Some("text"));
}

#[test]
fn test_uses_are_collected_from_merged_properties() {
    let reader = MemoryReader::default()
        .with("/proj/image.yaml", IMAGE_TEMPLATE);
    let workspace = workspace(reader);
    let definition = resolve(&workspace, GALLERY);

    assert_eq!(
        definition.uses().to_vec(),
        vec![r"App\Entity\Image", r"App\Entity\Cover"]
    );
    assert_eq!(
        definition.form_uses().to_vec(),
        vec![r"App\Form\GalleryForm", r"App\Form\MediaType"]
    );
}

#[test]
fn test_add_use_never_duplicates() {
    let workspace = workspace(MemoryReader::default());
    let mut definition = resolve(&workspace, "article: {}\n");

    for _ in 0..3 {
        definition.add_use(r"App\Entity\Image");
        definition.add_use(r"App\Entity\Cover");
        definition.add_form_use(r"App\Form\ImageType");
    }

    assert_eq!(definition.uses().len(), 2);
    assert_eq!(definition.form_uses().len(), 1);
    assert_eq!(definition.entity_php_class().uses.len(), 2);
}

#[test_log::test]
fn test_classes_are_cross_referenced() {
    let workspace = workspace(MemoryReader::default());
    let mut definition = resolve(&workspace, SLIDER);

    let children = definition.classes().unwrap();
    assert_eq!(children.len(), 2);

    let slide = &children[0];
    let slider = ClassRef {
        namespace: r"App\Entity".to_string(),
        name: "slider".to_string(),
    };
    assert_eq!(slide.name(), "slide");
    assert_eq!(slide.sub_directories(), ["slider".to_string()]);
    assert_eq!(slide.entity_namespace(), r"App\Entity\slider");
    assert!(slide.uses().contains(r"App\Entity\slider"));
    assert_eq!(slide.parent(), Some(&slider));

    assert_eq!(
        definition.uses().to_vec(),
        vec![r"App\Entity\slider\slide", r"App\Entity\slider\caption"]
    );
    for child in &children {
        assert!(definition.uses().contains(&child.class_ref().to_string()));
        assert!(child.uses().contains(&definition.class_ref().to_string()));
    }
    assert!(definition.parent().is_none());

    // A second expansion does not duplicate the imports.
    definition.classes().unwrap();
    assert_eq!(definition.uses().len(), 2);
}

#[test]
fn test_class_with_missing_template_fails_expansion() {
    let workspace = workspace(MemoryReader::default());
    let mut definition = resolve(&workspace, SLIDER_WITH_MISSING_TEMPLATE);

    match definition.classes() {
        Err(Error::TemplateNotFound { template }) => assert_eq!(template, "image"),
        other => panic!("Expected TemplateNotFound, got {other:?}"),
    }
}

#[test]
fn test_descriptors() {
    let workspace = workspace(MemoryReader::default())
        .with_normalizer(Box::new(StripPrefixes::new(["acme_"])));
    let definition = resolve(&workspace, QUOTE);

    assert_eq!(definition.label(), "Citation");
    assert!(definition.block_type());
    assert_eq!(
        definition.groups_string().as_deref(),
        Some("[ 'content', 'layout' ]\n")
    );

    let entity = definition.entity_php_class();
    assert_eq!(entity.namespace, r"Acme\BlogBundle\Entity");
    assert_eq!(entity.name, "Quote");
    assert_eq!(
        entity.fully_qualified_name(),
        r"Acme\BlogBundle\Entity\Quote"
    );
    assert_eq!(
        entity.implements.as_deref(),
        Some(r"Acme\BlogBundle\Model\BlockInterface")
    );
    assert_eq!(entity.traits, vec![r"Acme\BlogBundle\Model\BlockTrait"]);
    assert_eq!(entity.properties.len(), 2);
    assert!(entity.generate.constructor);
    assert!(entity.generate.accessors);
    assert!(entity.generate.adders_removers);

    let form_class = definition.form_type_php_class();
    assert_eq!(form_class.namespace, r"Acme\BlogBundle\Form\Type");
    assert_eq!(form_class.name, "QuoteType");
    assert!(form_class.properties.is_empty());
    assert!(!form_class.generate.constructor);

    let mapping = definition.persistence_mapping();
    assert_eq!(mapping.table_name, "blog_quote");
    assert_eq!(mapping.fields[0].field_type.as_deref(), Some("string"));
    assert!(mapping.fields[0].nullable);
    assert_eq!(mapping.fields[1].name, "author");
    assert!(!mapping.fields[1].nullable);

    let form_type = definition.form_type();
    assert_eq!(form_type.block_prefix, "acme_blog_quote");
    assert_eq!(form_type.properties.len(), 2);
}

#[test]
fn test_missing_groups() {
    let workspace = workspace(MemoryReader::default());
    let definition = resolve(&workspace, "article: {}\n");

    assert_eq!(definition.groups_string(), None);
    assert!(!definition.block_type());
    assert!(definition.traits().is_empty());
    assert_eq!(definition.implements(), None);
}
