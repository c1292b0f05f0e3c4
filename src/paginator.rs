/// Splits an already sorted list in 1-based pages of `page_size` items.
pub struct Paginator<'a, T> {
    post_list: &'a [T],
    page_size: u32,
    page_count: u32,
}

impl<'a, T> Paginator<'a, T> {
    pub fn from(post_list: &'a [T], page_size: u32) -> Self {
        if post_list.is_empty() {
            return Paginator {
                post_list,
                page_size,
                page_count: 0,
            };
        }
        let post_count = post_list.len() as u32;
        let upper_bound = post_count - 1;
        let page_count = (upper_bound / page_size) + 1;

        Paginator {
            post_list,
            page_size,
            page_count,
        }
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn get_page(&self, page: u32) -> Result<&[T], String> {
        match page {
            0 => return Err("Page has to be greater than 0".to_string()),
            x if x > self.page_count => return Err(format!("Page has to be less than page_count ({})", self.page_count)),
            _ => {}
        };

        let index = ((page - 1) * self.page_size) as usize;
        let mut page_size = (self.page_size as usize) + index;
        if page_size > self.post_list.len() {
            page_size = self.post_list.len();
        }
        let x = &self.post_list[index..page_size];
        Ok(x)
    }

    /// Clamps an out of range request to the first page.
    pub fn sanitize_page(&self, page: u32) -> u32 {
        match page {
            0 => 1,
            x if x > self.page_count => 1,
            x => x,
        }
    }
}
