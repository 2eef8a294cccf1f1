//! Mapping of CRM events onto CMS event documents.
//!
//! Create payloads get fresh udis for every block. Update payloads keep the
//! existing page blocks and their udis, and rewrite only the CRM-sourced
//! fields of the event-description block. Social-network block lists carry
//! no state worth keeping and are rebuilt from the CRM record every time.

use rand::rngs::ThreadRng;
use rand::Rng;
use serde_json::Map;

use crate::blocks::{
    Block, BlockList, EventDescriptionBlock, HeroImageBlock, ImageGalleryBlock, Link,
    SocialNetworkBlock, StaticBlock,
};
use crate::document::{EventDocument, Invariant, EVENT_CONTENT_TYPE};
use crate::freshness::quote_marker;
use crate::locale::{Locale, Localized};
use crate::models::{CrmEvent, SocialMedia};
use crate::templates::StaticBlocks;
use crate::udi::Udi;

/// Layout position of the event-description block in every locale.
pub const DESCRIPTION_POSITION: usize = 1;

/// The locale whose page carries the image gallery.
pub const GALLERY_LOCALE: Locale = Locale::EnUs;

/// CRM-derived content of an event-description block.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptionFields {
    pub description: String,
    pub organiser_name: String,
    pub organiser_website: Option<Vec<Link>>,
    pub social_networks: BlockList,
}

impl DescriptionFields {
    /// A new block with these fields.
    pub fn into_block(self, udi: Udi) -> EventDescriptionBlock {
        EventDescriptionBlock {
            udi,
            description: self.description,
            organiser_name: self.organiser_name,
            organiser_website: self.organiser_website,
            social_networks: self.social_networks,
            extra: Map::new(),
        }
    }

    /// `current` with its CRM-derived fields replaced. Udi and
    /// editor-added fields are kept.
    pub fn apply(self, current: &EventDescriptionBlock) -> EventDescriptionBlock {
        EventDescriptionBlock {
            extra: current.extra.clone(),
            ..self.into_block(current.udi)
        }
    }
}

/// Builds CMS documents from CRM events.
///
/// The randomness source is owned by the mapper so callers decide how udis
/// are drawn; tests pass a seeded generator.
pub struct DocumentMapper<R, T> {
    rng: R,
    templates: T,
}

impl<T: StaticBlocks> DocumentMapper<ThreadRng, T> {
    /// A mapper drawing udis from the thread-local generator.
    pub fn with_thread_rng(templates: T) -> Self {
        Self::new(rand::rng(), templates)
    }
}

impl<R: Rng, T: StaticBlocks> DocumentMapper<R, T> {
    pub fn new(rng: R, templates: T) -> Self {
        Self { rng, templates }
    }

    fn next_udi(&mut self) -> Udi {
        Udi::generate(&mut self.rng)
    }

    /// A complete create payload. `parentId` is only emitted when given.
    pub fn build_document(&mut self, event: &CrmEvent, parent_id: Option<&str>) -> EventDocument {
        let page_blocks = self.build_page_blocks(event);
        EventDocument {
            content_type_alias: Some(EVENT_CONTENT_TYPE.to_string()),
            parent_id: parent_id.map(str::to_string),
            page_blocks: Some(page_blocks),
            ..self.base_document(event)
        }
    }

    /// An update payload for `existing`.
    ///
    /// Page blocks are merged into the existing structure when there is one,
    /// otherwise built from scratch.
    pub fn build_update(&mut self, event: &CrmEvent, existing: &EventDocument) -> EventDocument {
        let page_blocks = match &existing.page_blocks {
            Some(pages) if !pages.is_empty() => self.merge_page_blocks(pages, event),
            _ => {
                tracing::debug!(
                    event_id = event.event_id,
                    "existing document has no page blocks, building fresh"
                );
                self.build_page_blocks(event)
            }
        };
        EventDocument {
            page_blocks: Some(page_blocks),
            ..self.base_document(event)
        }
    }

    /// Fields shared by create and update payloads.
    fn base_document(&mut self, event: &CrmEvent) -> EventDocument {
        let title = Localized::uniform(event.title.clone());
        EventDocument {
            content_type_alias: None,
            parent_id: None,
            name: title.clone(),
            title: title.clone(),
            description: Localized::uniform(event.body.clone()),
            meta_title: title.clone(),
            meta_description: title,
            start_date: Invariant::new(event.start_date.clone()),
            end_date: Invariant::new(event.end_date.clone()),
            category: Invariant::new(non_blank(event.event_type.as_deref())),
            organiser_name: Invariant::new(event.organiser_name.clone()),
            organiser_website: website_links(event).map(Invariant::new),
            social_networks: Invariant::new(self.build_social_block_list(&event.social_media)),
            event_id: Invariant::new(event.cms_id()),
            last_updated_date: Invariant::new(quote_marker(&event.last_updated_date)),
            location: Invariant::new(event.location.clone()),
            venues: Invariant::new(event.venues.clone()),
            audience: Invariant::new(non_blank(event.audience.as_deref())),
            sectors: Invariant::new(event.sectors.clone()),
            page_blocks: None,
        }
    }

    /// One social-network block per channel with a non-blank URL.
    pub fn build_social_block_list(&mut self, social: &SocialMedia) -> BlockList {
        let mut list = BlockList::new();
        for (channel, url) in social.links() {
            list.push(Block::SocialNetwork(SocialNetworkBlock {
                udi: self.next_udi(),
                name: channel.display_name().to_string(),
                link: vec![Link::external(url)],
                extra: Map::new(),
            }));
        }
        list
    }

    /// The CRM-derived description content, with a freshly built social list.
    pub fn description_fields(&mut self, event: &CrmEvent) -> DescriptionFields {
        DescriptionFields {
            description: event.body.clone(),
            organiser_name: event.organiser_name.clone(),
            organiser_website: website_links(event),
            social_networks: self.build_social_block_list(&event.social_media),
        }
    }

    /// Page blocks for a new document, every block with a fresh udi.
    pub fn build_page_blocks(&mut self, event: &CrmEvent) -> Localized<BlockList> {
        Localized::from_fn(|locale| self.locale_page_blocks(locale, event))
    }

    fn locale_page_blocks(&mut self, locale: Locale, event: &CrmEvent) -> BlockList {
        let mut list = BlockList::new();

        // Image mapping from the CRM is not done yet; the block is emitted empty.
        list.push(Block::HeroImage(HeroImageBlock {
            udi: self.next_udi(),
            extra: Map::new(),
        }));

        let udi = self.next_udi();
        let description = self.description_fields(event).into_block(udi);
        list.push(Block::EventDescription(description));

        if locale == GALLERY_LOCALE {
            list.push(Block::ImageGallery(ImageGalleryBlock {
                udi: self.next_udi(),
                extra: Map::new(),
            }));
        }

        for template in self.templates.static_blocks(locale) {
            let udi = self.next_udi();
            list.push(Block::Static(StaticBlock::new(
                template.content_type_key,
                udi,
                template.fields,
            )));
        }

        list
    }

    /// Page blocks for an update: a copy of `existing` where each locale's
    /// event-description block carries the current CRM fields.
    ///
    /// A locale whose description position is missing, or holds some other
    /// kind of block, is carried over unchanged.
    pub fn merge_page_blocks(
        &mut self,
        existing: &Localized<BlockList>,
        event: &CrmEvent,
    ) -> Localized<BlockList> {
        existing.map(|locale, list| self.merge_locale(locale, list, event))
    }

    fn merge_locale(&mut self, locale: Locale, list: &BlockList, event: &CrmEvent) -> BlockList {
        let current = match list.block_at(DESCRIPTION_POSITION) {
            Some(Block::EventDescription(current)) => current,
            other => {
                tracing::warn!(
                    event_id = event.event_id,
                    %locale,
                    found = other.map(Block::content_type_key).unwrap_or("nothing"),
                    "no event description block at expected position, leaving locale unchanged"
                );
                return list.clone();
            }
        };

        let updated = self.description_fields(event).apply(current);
        list.with_replaced(DESCRIPTION_POSITION, Block::EventDescription(updated))
            .unwrap_or_else(|| list.clone())
    }
}

fn website_links(event: &CrmEvent) -> Option<Vec<Link>> {
    event.website().map(|url| vec![Link::external(url)])
}

/// A singleton list for a present, non-blank value; empty otherwise.
/// The value is written as given.
fn non_blank(value: Option<&str>) -> Vec<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| vec![v.to_string()])
        .unwrap_or_default()
}
